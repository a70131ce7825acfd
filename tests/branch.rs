use predicates::prelude::predicate;

mod common;

#[test]
fn created_branch_snapshots_history_and_diverges_from_its_source()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_local(dir.path());
    common::write_local_file(dir.path(), "a.txt", "hello");
    common::add(dir.path(), "a.txt");
    common::commit(dir.path(), "first");

    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--create")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created branch dev"));

    common::write_local_file(dir.path(), "b.txt", "world");
    common::add(dir.path(), "b.txt");
    common::commit(dir.path(), "second");

    let branches = common::read_branches(dir.path(), common::LOCAL_REPO);
    assert_eq!(branches["dev"].len(), 1);
    assert_eq!(branches["main"].len(), 2);
    assert_eq!(branches["dev"][0], branches["main"][0]);

    Ok(())
}

#[test]
fn switching_to_an_unknown_branch_is_reported_and_head_stays() {
    let dir = assert_fs::TempDir::new().unwrap();
    common::init_local(dir.path());

    common::kit(dir.path())
        .arg("branch")
        .arg("ghost")
        .arg("--switch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Branch ghost does not exist."));

    assert_eq!(
        common::read_head(dir.path(), common::LOCAL_REPO),
        "ref: refs/heads/main\n"
    );
}

#[test]
fn switching_repoints_head_and_later_commits_land_on_the_new_branch()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_local(dir.path());

    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--create")
        .assert()
        .success();

    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--switch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch dev"));

    assert_eq!(
        common::read_head(dir.path(), common::LOCAL_REPO),
        "ref: refs/heads/dev\n"
    );

    common::write_local_file(dir.path(), "a.txt", "hello");
    common::add(dir.path(), "a.txt");
    common::commit(dir.path(), "on dev");

    let branches = common::read_branches(dir.path(), common::LOCAL_REPO);
    assert_eq!(branches["dev"].len(), 1);
    assert_eq!(branches["main"], Vec::<String>::new());

    Ok(())
}

#[test]
fn recreating_an_existing_branch_requires_force() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_local(dir.path());
    common::write_local_file(dir.path(), "a.txt", "hello");
    common::add(dir.path(), "a.txt");
    common::commit(dir.path(), "first");

    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--create")
        .assert()
        .success();

    common::write_local_file(dir.path(), "b.txt", "world");
    common::add(dir.path(), "b.txt");
    common::commit(dir.path(), "second");

    // without --force the existing branch is left alone
    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--create")
        .assert()
        .success()
        .stdout(predicate::str::contains("Branch dev already exists."));
    assert_eq!(common::read_branches(dir.path(), common::LOCAL_REPO)["dev"].len(), 1);

    // with --force it is re-snapshotted from the current branch
    common::kit(dir.path())
        .arg("branch")
        .arg("dev")
        .arg("--create")
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created branch dev"));
    assert_eq!(common::read_branches(dir.path(), common::LOCAL_REPO)["dev"].len(), 2);

    Ok(())
}

#[test]
fn branch_names_with_metacharacters_are_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    common::init_local(dir.path());

    common::kit(dir.path())
        .arg("branch")
        .arg("bad..name")
        .arg("--create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

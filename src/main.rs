use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;

/// Local repository directory name
const LOCAL_REPO: &str = "local";
/// Cloud repository directory name
const CLOUD_REPO: &str = "cloud";

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A tiny version-control core with cloud-style push",
    long_about = "A minimal version control system: content-addressed object store, \
    staging index, per-branch commit histories, and a one-way push that \
    reconciles the local branch store into a cloud repository.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        repo: String,
    },
    #[command(name = "add", about = "Stage a file into the index")]
    Add {
        #[arg(index = 1, help = "The file to stage, relative to the repository root")]
        file: String,
    },
    #[command(name = "commit", about = "Commit the staged files")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "push", about = "Push branch histories to the cloud repository")]
    Push,
    #[command(name = "branch", about = "Create or switch branches")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
        #[arg(long, help = "Create the branch from the current one")]
        create: bool,
        #[arg(long, help = "Switch to the branch")]
        switch: bool,
        #[arg(long, help = "Allow --create to overwrite an existing branch")]
        force: bool,
    },
}

fn local_repository() -> Result<Repository> {
    Repository::new(LOCAL_REPO, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { repo } => {
            let mut repository = Repository::new(repo, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::Add { file } => {
            let mut repository = local_repository()?;

            repository.add(file)?
        }
        Commands::Commit { message } => {
            let mut repository = local_repository()?;

            repository.commit(message.as_str())?
        }
        Commands::Push => {
            let mut repository = local_repository()?;
            let remote = Repository::new(CLOUD_REPO, Box::new(std::io::sink()))?;

            repository.push(&remote)?
        }
        Commands::Branch {
            name,
            create,
            switch,
            force,
        } => {
            let mut repository = local_repository()?;

            if *create {
                repository.create_branch(name, *force)?
            } else if *switch {
                repository.switch_branch(name)?
            } else {
                println!("Use --create or --switch with a branch name.")
            }
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use nit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "nit",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "nit is a tiny local version-control system: a content-addressed \
    object store, a commit graph with branches, a staging area, and a three-way \
    merge, all scoped to a single flat directory.",
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
    #[command(name = "init", about = "Initialize a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "rm", about = "Unstage a file, or stage a tracked file for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made, in no particular order")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits whose message contains the given text")]
    Find {
        #[arg(index = 1, help = "The text to search commit messages for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(name = "branch", about = "Create a branch pointing at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch branches, or restore files from a commit",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from HEAD, and \
        `checkout <commit-id> -- <file>` restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when restoring a file")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        paths: Vec<String>,
    },
    #[command(name = "reset", about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1, help = "The commit id, or an unambiguous prefix of one")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) && !repository.is_initialized() {
        anyhow::bail!("Not in an initialized nit directory.");
    }

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Checkout { target, paths } => match (target, paths.as_slice()) {
            (Some(branch), []) => repository.checkout_branch(branch)?,
            (None, [file]) => repository.checkout_file(None, file)?,
            (Some(commit_id), [file]) => repository.checkout_file(Some(commit_id), file)?,
            _ => anyhow::bail!("Incorrect operands."),
        },
        Commands::Reset { commit_id } => repository.reset(commit_id)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    Ok(())
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Keep a directory of ansible-galaxy roles in sync with requirements.yml
#[derive(Parser, Debug)]
#[command(name = "rolesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Requirements file to read
    #[arg(short = 'r', long, default_value = "requirements.yml")]
    pub requirements: PathBuf,

    /// Directory roles are installed into
    #[arg(short = 'p', long, default_value = "roles/galaxy/")]
    pub roles_path: PathBuf,

    /// Rewrite the requirements file with the latest remote tags first
    #[arg(short = 'u', long)]
    pub update: bool,

    /// List installed roles and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Delete the named installed role and exit; other actions are skipped
    #[arg(short = 'd', long, value_name = "NAME")]
    pub delete: Option<String>,

    /// Maximum parallel installs; 0 means one worker per role
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Keep per-role scratch directories and archives around
    #[arg(long)]
    pub no_cleanup: bool,

    /// Skip installing missing roles
    #[arg(long)]
    pub no_install: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

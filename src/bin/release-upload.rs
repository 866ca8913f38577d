use std::path::PathBuf;

use clap::{Parser, Subcommand};

use showcase::release::{
    collect_artifacts, ensure_folders, format_size, remote_url_with_token, sync_gitattributes,
    DEFAULT_UPLOAD_FOLDERS,
};

#[derive(Parser)]
#[command(name = "release-upload")]
#[command(about = "Prepare release binaries for a large-file push", long_about = None)]
struct Cli {
    /// Repository root holding the upload folders.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Upload folders, relative to the root.
    #[arg(short, long = "folder", value_delimiter = ',')]
    folders: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the files that would be uploaded
    Plan,
    /// Create upload folders and large-file tracking rules
    Prepare,
    /// Print the push URL with the access token embedded
    Remote {
        url: String,
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
        token: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let folders: Vec<&str> = if cli.folders.is_empty() {
        DEFAULT_UPLOAD_FOLDERS.to_vec()
    } else {
        cli.folders.iter().map(String::as_str).collect()
    };

    match cli.command {
        Commands::Plan => {
            let artifacts = collect_artifacts(&cli.root, &folders)?;
            if artifacts.is_empty() {
                println!("No files to upload in {}", folders.join(", "));
                return Ok(());
            }
            let mut total = 0;
            for artifact in &artifacts {
                let shown = artifact.path.strip_prefix(&cli.root).unwrap_or(&artifact.path);
                let marker = if artifact.lfs { "[lfs]" } else { "     " };
                println!("{marker} {:>10}  {}", format_size(artifact.size), shown.display());
                total += artifact.size;
            }
            println!("{} file(s), {} total", artifacts.len(), format_size(total));
        }
        Commands::Prepare => {
            for path in ensure_folders(&cli.root, &folders)? {
                println!("created {}", path.display());
            }
            let added = sync_gitattributes(&cli.root)?;
            if added.is_empty() {
                println!(".gitattributes already tracks every large-file extension");
            }
            for line in added {
                println!("tracked {line}");
            }
        }
        Commands::Remote { url, token } => {
            println!("{}", remote_url_with_token(&url, &token));
        }
    }

    Ok(())
}

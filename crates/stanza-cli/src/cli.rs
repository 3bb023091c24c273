//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Stanza - inspect and edit stanza files such as /etc/filesystems
#[derive(Parser, Debug)]
#[command(name = "stanza")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Character that starts a comment line (default: *)
    #[arg(long, global = true, value_name = "CHAR")]
    pub comment_char: Option<char>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the reformatted file
    Show {
        /// Stanza file
        file: PathBuf,
    },

    /// List stanza names, one per line
    List {
        /// Stanza file
        file: PathBuf,
    },

    /// Print a stanza, or a single attribute of it
    Get {
        /// Stanza file
        file: PathBuf,
        /// Stanza name, without the trailing colon
        stanza: String,
        /// Attribute to print
        attr: Option<String>,
    },

    /// Set an attribute on every stanza with the given name
    ///
    /// Examples:
    ///   stanza set /etc/filesystems /home log INLINE
    ///   stanza set filesystems /nim/spot dev /dev/lvspot -o filesystems.new
    Set {
        /// Stanza file
        file: PathBuf,
        /// Stanza name
        stanza: String,
        /// Attribute name
        attr: String,
        /// New value
        value: String,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove an attribute from every stanza with the given name
    Unset {
        /// Stanza file
        file: PathBuf,
        /// Stanza name
        stanza: String,
        /// Attribute name
        attr: String,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append a new stanza
    Add {
        /// Stanza file
        file: PathBuf,
        /// Stanza name
        stanza: String,
        /// Attributes as key=value
        attrs: Vec<String>,
        /// Comment lines for the stanza
        #[arg(short, long)]
        comment: Vec<String>,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove every stanza with the given name
    Remove {
        /// Stanza file
        file: PathBuf,
        /// Stanza name
        stanza: String,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the reformatted file to another path
    Copy {
        /// Stanza file
        file: PathBuf,
        /// Destination
        dest: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_set_with_output() {
        let cli = Cli::parse_from([
            "stanza", "set", "filesystems", "/home", "dev", "/dev/hd2", "-o", "out",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Set {
                file: PathBuf::from("filesystems"),
                stanza: "/home".into(),
                attr: "dev".into(),
                value: "/dev/hd2".into(),
                output: Some(PathBuf::from("out")),
            })
        );
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stanza", "list", "f", "--comment-char", "#", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.comment_char, Some('#'));
    }

    #[test]
    fn parse_add_with_attrs_and_comments() {
        let cli = Cli::parse_from([
            "stanza", "add", "f", "/tmp", "dev=/dev/hd3", "mount=true", "-c", "scratch",
        ]);
        match cli.command {
            Some(Commands::Add { attrs, comment, .. }) => {
                assert_eq!(attrs, vec!["dev=/dev/hd3", "mount=true"]);
                assert_eq!(comment, vec!["scratch"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

//! Command line arguments

use std::ffi::OsString;

use clap::Parser;
use hoog_codegen::{GenerationConfig, Location, DEFAULT_FILE_NAME};
use hoog_format::FormatterChoice;

#[derive(Parser, Debug)]
#[clap(name = "hoog", disable_version_flag = true)]
#[clap(about = "Generate a multicast hook for a single-method Go interface")]
pub struct Args {
    /// Interface to hook (e.g., ./internal/instance.Callback)
    #[clap(long, default_value = "")]
    pub src: String,

    /// Package directory and optional hook type name (e.g., ./internal/cbhook.Callbacks)
    #[clap(long, default_value = "")]
    pub dst: String,

    /// Guard the hook with a mutex
    #[clap(long)]
    pub safe: bool,

    /// Formatter applied to the generated source
    #[clap(long = "fmt", value_enum, default_value_t = FormatterChoice::Gofmt)]
    pub formatter: FormatterChoice,

    /// Name of the generated file in the destination directory
    #[clap(long, default_value = DEFAULT_FILE_NAME)]
    pub file: String,

    /// Print the resolved template parameters as JSON instead of writing
    #[clap(long)]
    pub plan: bool,

    /// Enable debug logging
    #[clap(long)]
    pub verbose: bool,

    /// Print version and exit
    #[clap(long)]
    pub version: bool,
}

impl Args {
    /// Parse Go-style arguments, where long flags take a single dash
    pub fn parse_go_style<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize(args))
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::new(Location::parse(&self.src), Location::parse(&self.dst))
            .with_thread_safe(self.safe)
            .with_formatter(self.formatter)
            .with_file_name(self.file.clone())
    }
}

/// Rewrite `-flag` and `-flag=value` to their double-dash form.
/// Arguments after a bare `--` are left alone.
pub fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || positional {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    positional = true;
                    arg
                }
                Some(flag) if is_single_dash_long(flag) => OsString::from(format!("-{flag}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    arg.len() > 2 && arg.starts_with('-') && !arg.starts_with("--")
}

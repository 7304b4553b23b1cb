use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gateway_lib::{GatewayConfig, UploadOptions};
use simplelog::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gateway-upload",
    version,
    about = "Validate files and upload them to the local file gateway"
)]
pub struct Args {
    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Gateway base URL
    #[arg(long, env = "GATEWAY_URL")]
    pub url: Option<String>,

    /// JSON gateway configuration (base_url, timeouts, policy)
    #[arg(long, env = "GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GATEWAY_USER_ID")]
    pub user_id: Option<String>,

    #[arg(long)]
    pub privacy_level: Option<String>,

    /// Ask the gateway to keep the file in memory
    #[arg(long)]
    pub save_to_memory: Option<bool>,

    #[arg(long)]
    pub conversation_id: Option<String>,

    /// Override the policy's maximum file size, in bytes
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Whole-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Validate only, do not upload
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: GatewayConfig) -> GatewayConfig {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(max_size) = self.max_size {
            config.policy.max_size = max_size;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = Some(secs);
        }
        config
    }

    pub fn upload_options(&self) -> UploadOptions {
        let mut options = UploadOptions::new();
        if let Some(user_id) = &self.user_id {
            options = options.user_id(user_id);
        }
        if let Some(level) = &self.privacy_level {
            options = options.privacy_level(level);
        }
        if let Some(save) = self.save_to_memory {
            options = options.save_to_memory(save);
        }
        if let Some(id) = &self.conversation_id {
            options = options.conversation_id(id);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gateway-upload").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_files_are_required() {
        assert!(Args::try_parse_from(["gateway-upload"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["a.md"]).log_level(), LevelFilter::Warn);
        assert_eq!(parse(&["-vv", "a.md"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["-vvvv", "a.md"]).log_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse(&[
            "--url",
            "http://127.0.0.1:9000",
            "--max-size",
            "2048",
            "--timeout-secs",
            "30",
            "a.md",
        ]);
        let config = args.apply(GatewayConfig::default());

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.policy.max_size, 2048);
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_upload_options_from_flags() {
        let args = parse(&[
            "--user-id",
            "alice",
            "--save-to-memory",
            "false",
            "a.md",
            "b.pdf",
        ]);
        let fields = args.upload_options().form_fields();

        assert_eq!(args.files.len(), 2);
        assert!(fields.contains(&("user_id", "alice".to_string())));
        assert!(fields.contains(&("save_to_memory", "false".to_string())));
        assert!(!fields.iter().any(|(name, _)| *name == "privacy_level"));
    }
}

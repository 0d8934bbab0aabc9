//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use storybook_core::{Story, StoryResult};
use storybook_logging::{FileConfig, LogConfig, RotationStrategy};

/// Command line arguments.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "storybook")]
#[command(about = "Animated storybook: cover, typewriter chapters, image interludes")]
pub struct Args {
    /// Path to a JSON story file (plays the bundled sample story if omitted)
    #[arg(long)]
    pub story: Option<PathBuf>,

    /// Playback speed multiplier; 2.0 plays twice as fast
    #[arg(short, long, default_value = "1.0", value_parser = parse_speed)]
    pub speed: f32,

    /// Default log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also write JSONL session logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Human-readable console logs instead of JSONL
    #[arg(long)]
    pub pretty: bool,

    /// Log only to --log-dir, nothing on the console
    #[arg(long, requires = "log_dir", conflicts_with = "pretty")]
    pub quiet: bool,
}

fn parse_speed(value: &str) -> Result<f32, String> {
    let speed: f32 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(format!("speed must be a positive number, got {value}"));
    }
    Ok(speed)
}

impl Args {
    /// Logging configuration for this run.
    pub fn log_config(&self) -> LogConfig {
        let mut config = match &self.log_dir {
            Some(dir) if self.quiet => LogConfig::production(dir.clone()),
            _ if self.pretty => LogConfig::development(),
            _ => LogConfig::default(),
        };
        config.default_level = self.log_level.clone();
        config.file = self.log_dir.as_ref().map(|dir| {
            FileConfig::new(dir.clone()).with_rotation(RotationStrategy::Never)
        });
        config
    }

    /// Load the requested story with the speed multiplier applied.
    pub fn load_story(&self) -> StoryResult<Story> {
        let story = match &self.story {
            Some(path) => Story::load(path)?,
            None => {
                tracing::info!("No --story given, playing the sample story");
                Story::sample()?
            }
        };
        Ok(story.scaled(self.speed))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["storybook"]).unwrap();
        assert_eq!(args.story, None);
        assert_eq!(args.speed, 1.0);
        assert_eq!(args.log_level, "info");
        assert!(!args.pretty);
        assert!(!args.quiet);
    }

    #[test]
    fn test_speed_must_be_positive() {
        assert!(Args::try_parse_from(["storybook", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["storybook", "--speed", "-2"]).is_err());
        assert!(Args::try_parse_from(["storybook", "--speed", "fast"]).is_err());
        let args = Args::try_parse_from(["storybook", "-s", "2.5"]).unwrap();
        assert_eq!(args.speed, 2.5);
    }

    #[test]
    fn test_log_config() {
        let args = Args::try_parse_from([
            "storybook",
            "--pretty",
            "--log-level",
            "storybook_core=trace",
            "--log-dir",
            "/tmp/storybook-logs",
        ])
        .unwrap();
        let config = args.log_config();
        assert!(config.console.pretty);
        assert_eq!(config.default_level, "storybook_core=trace");
        let file = config.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("/tmp/storybook-logs"));
        assert_eq!(file.rotation, RotationStrategy::Never);
    }

    #[test]
    fn test_quiet_logs_to_file_only() {
        let args =
            Args::try_parse_from(["storybook", "--quiet", "--log-dir", "/tmp/storybook-logs"])
                .unwrap();
        let config = args.log_config();
        assert!(!config.console.enabled);
        assert_eq!(config.default_level, "info");
        let file = config.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("/tmp/storybook-logs"));
        assert_eq!(file.rotation, RotationStrategy::Never);
    }

    #[test]
    fn test_quiet_needs_a_log_dir() {
        assert!(Args::try_parse_from(["storybook", "--quiet"]).is_err());
        assert!(
            Args::try_parse_from(["storybook", "--quiet", "--pretty", "--log-dir", "/tmp/x"])
                .is_err()
        );
    }

    #[test]
    fn test_sample_story_with_speed() {
        let args = Args::try_parse_from(["storybook", "--speed", "2"]).unwrap();
        let story = args.load_story().unwrap();
        assert_eq!(story.timings().cover_exit, Duration::from_millis(400));
        let interlude = story.interlude_after(0).unwrap();
        assert_eq!(interlude.images[0].duration, Duration::from_millis(2500));
    }

    #[test]
    fn test_missing_story_file() {
        let args =
            Args::try_parse_from(["storybook", "--story", "/no/such/story.json"]).unwrap();
        assert!(args.load_story().is_err());
    }
}

//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, LogLevel, ViewMode};

/// Track a coloured object through the camera by HSV thresholding
#[derive(Parser, Debug)]
#[command(name = "copter-tracker")]
#[command(version, about = "Colour object tracker with a terminal view", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Requested capture width
    #[arg(long)]
    pub width: Option<u32>,

    /// Requested capture height
    #[arg(long)]
    pub height: Option<u32>,

    /// Requested frame rate
    #[arg(long)]
    pub fps: Option<u32>,

    /// Mirror camera horizontally
    #[arg(long)]
    pub mirror: bool,

    /// View shown on start
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// ASCII character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Hide the frame-centre guide lines
    #[arg(long)]
    pub no_guides: bool,

    /// Skip erode/dilate cleanup of the threshold mask
    #[arg(long)]
    pub no_morph: bool,

    #[arg(long, value_name = "0-255")]
    pub h_min: Option<u8>,
    #[arg(long, value_name = "0-255")]
    pub h_max: Option<u8>,
    #[arg(long, value_name = "0-255")]
    pub s_min: Option<u8>,
    #[arg(long, value_name = "0-255")]
    pub s_max: Option<u8>,
    #[arg(long, value_name = "0-255")]
    pub v_min: Option<u8>,
    #[arg(long, value_name = "0-255")]
    pub v_max: Option<u8>,

    /// Print `x,y area` per tracked frame instead of drawing the terminal view
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many processed frames (headless only)
    #[arg(long, requires = "headless")]
    pub frames: Option<u64>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["copter-tracker"]);
        assert!(args.camera.is_none());
        assert!(args.width.is_none());
        assert!(args.view.is_none());
        assert!(args.charset.is_none());
        assert!(!args.mirror);
        assert!(!args.invert);
        assert!(!args.no_guides);
        assert!(!args.no_morph);
        assert!(!args.headless);
        assert!(args.frames.is_none());
        assert!(args.config.is_none());
        assert!(args.log_file.is_none());
        assert!(args.log_level.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_camera_settings() {
        let args = Args::parse_from([
            "copter-tracker",
            "--camera",
            "2",
            "--width",
            "320",
            "--height",
            "240",
            "--fps",
            "15",
            "--mirror",
        ]);
        assert_eq!(args.camera, Some(2));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.height, Some(240));
        assert_eq!(args.fps, Some(15));
        assert!(args.mirror);
    }

    #[test]
    fn test_args_hsv_bounds() {
        let args = Args::parse_from([
            "copter-tracker",
            "--h-min",
            "20",
            "--h-max",
            "40",
            "--s-min",
            "100",
            "--s-max",
            "255",
            "--v-min",
            "50",
            "--v-max",
            "200",
        ]);
        assert_eq!(args.h_min, Some(20));
        assert_eq!(args.h_max, Some(40));
        assert_eq!(args.s_min, Some(100));
        assert_eq!(args.s_max, Some(255));
        assert_eq!(args.v_min, Some(50));
        assert_eq!(args.v_max, Some(200));
    }

    #[test]
    fn test_args_hsv_bound_out_of_range() {
        assert!(Args::try_parse_from(["copter-tracker", "--h-min", "256"]).is_err());
    }

    #[test]
    fn test_args_view_and_charset_values() {
        let args = Args::parse_from(["copter-tracker", "--view", "threshold", "--charset", "minimal"]);
        assert_eq!(args.view, Some(ViewMode::Threshold));
        assert_eq!(args.charset, Some(CharacterSet::Minimal));

        let args = Args::parse_from(["copter-tracker", "--view", "morphed"]);
        assert_eq!(args.view, Some(ViewMode::Morphed));
    }

    #[test]
    fn test_args_toggles() {
        let args = Args::parse_from(["copter-tracker", "--no-guides", "--no-morph", "--invert"]);
        assert!(args.no_guides);
        assert!(args.no_morph);
        assert!(args.invert);
    }

    #[test]
    fn test_args_headless_frames() {
        let args = Args::parse_from(["copter-tracker", "--headless", "--frames", "100"]);
        assert!(args.headless);
        assert_eq!(args.frames, Some(100));
    }

    #[test]
    fn test_args_frames_requires_headless() {
        assert!(Args::try_parse_from(["copter-tracker", "--frames", "10"]).is_err());
    }

    #[test]
    fn test_args_logging() {
        let args = Args::parse_from([
            "copter-tracker",
            "--log-file",
            "/tmp/tracker.log",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/tracker.log")));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["copter-tracker", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["copter-tracker", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["copter-tracker", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["copter-tracker", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["copter-tracker", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }
}

use crate::camera::{palette, Palette, Settings};
use crate::error::Result;
use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaletteChoice {
    Standard,
    Short,
    Long,
}

impl PaletteChoice {
    pub fn chars(self) -> &'static str {
        match self {
            PaletteChoice::Standard => palette::STANDARD,
            PaletteChoice::Short => palette::SHORT,
            PaletteChoice::Long => palette::LONG,
        }
    }
}

/// Render options shared by the interactive and snapshot binaries.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long, default_value_t = 360)]
    pub width: usize,

    #[arg(long, default_value_t = 100)]
    pub height: usize,

    /// Size the frame to the terminal instead of --width/--height
    #[arg(long, default_value_t = false)]
    pub fit: bool,

    #[arg(long, default_value_t = 3.)]
    pub min_dist: f64,

    #[arg(long, default_value_t = 100.)]
    pub fog_dist: f64,

    #[arg(long, default_value_t = 500.)]
    pub max_view_dist: f64,

    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    #[arg(long, default_value_t = 0.01)]
    pub epsilon: f64,

    #[arg(short, long, value_enum, default_value_t = PaletteChoice::Standard)]
    pub palette: PaletteChoice,

    /// Custom palette, darkest first; overrides --palette
    #[arg(long)]
    pub palette_chars: Option<String>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 100.)]
    pub fov_x: f64,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 55.)]
    pub fov_y: f64,
}

impl RenderArgs {
    pub fn settings(&self) -> Result<Settings> {
        let chars = self
            .palette_chars
            .as_deref()
            .unwrap_or_else(|| self.palette.chars());
        let settings = Settings {
            width: self.width,
            height: self.height,
            min_dist: self.min_dist,
            fog_dist: self.fog_dist,
            max_view_dist: self.max_view_dist,
            max_steps: self.max_steps,
            epsilon: self.epsilon,
            palette: Palette::new(chars)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Field of view in radians, `(x, y)`.
    pub fn fov(&self) -> (f64, f64) {
        (self.fov_x.to_radians(), self.fov_y.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        render: RenderArgs,
    }

    #[test]
    fn test_defaults_match_settings_default() {
        let cli = Cli::parse_from(["ascii-raymarch"]);
        let s = cli.render.settings().unwrap();
        let d = Settings::default();
        assert_eq!((s.width, s.height), (d.width, d.height));
        assert_eq!(s.min_dist, d.min_dist);
        assert_eq!(s.fog_dist, d.fog_dist);
        assert_eq!(s.max_view_dist, d.max_view_dist);
        assert_eq!(s.max_steps, d.max_steps);
        assert_eq!(s.epsilon, d.epsilon);
        assert_eq!(s.palette, d.palette);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "ascii-raymarch",
            "--width",
            "80",
            "--height",
            "24",
            "--palette",
            "short",
            "--max-steps",
            "50",
            "--fov-x",
            "90",
        ]);
        let s = cli.render.settings().unwrap();
        assert_eq!((s.width, s.height, s.max_steps), (80, 24, 50));
        assert_eq!(s.palette, Palette::new(palette::SHORT).unwrap());
        let (fx, _) = cli.render.fov();
        assert!((fx - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_custom_palette_wins() {
        let cli = Cli::parse_from(["ascii-raymarch", "-p", "long", "--palette-chars", " .o"]);
        assert_eq!(cli.render.settings().unwrap().palette.len(), 3);

        let bad = Cli::parse_from(["ascii-raymarch", "--palette-chars", "x"]);
        assert!(matches!(
            bad.render.settings(),
            Err(Error::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_rejects_fog_beyond_view_and_bad_epsilon() {
        for argv in [
            &["ascii-raymarch", "--fog-dist", "500"][..],
            &["ascii-raymarch", "--fog-dist", "200", "--max-view-dist", "150"][..],
            &["ascii-raymarch", "--epsilon", "0"][..],
            &["ascii-raymarch", "--epsilon=-0.5"][..],
        ] {
            let cli = Cli::parse_from(argv);
            assert!(matches!(
                cli.render.settings(),
                Err(Error::InvalidSettings(_))
            ));
        }
    }
}

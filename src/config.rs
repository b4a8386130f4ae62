use serde::Deserialize;
use crate::constants::*;
use crate::error::Result;

/// Attribute on `<body>` holding optional JSON overrides.
pub const CONFIG_ATTRIBUTE: &str = "data-site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarfieldConfig {
    pub container_id: String,
    pub star_density: f64,
    pub shooting_star_chance: f64,
    pub shooting_star_fade: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            container_id: STARFIELD_CONTAINER_ID.to_string(),
            star_density: STAR_DENSITY,
            shooting_star_chance: SHOOTING_STAR_CHANCE,
            shooting_star_fade: SHOOTING_STAR_FADE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub starfield: StarfieldConfig,
    pub mobile_breakpoint: f64,
    pub typing_effect: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            starfield: StarfieldConfig::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT,
            typing_effect: false,
        }
    }
}

impl StarfieldConfig {
    /// Resets out-of-range values to their defaults, naming each one reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut reset = Vec::new();
        if !self.star_density.is_finite() || self.star_density < MIN_STAR_DENSITY {
            self.star_density = defaults.star_density;
            reset.push("starfield.starDensity");
        }
        if !(0.0..=1.0).contains(&self.shooting_star_chance) {
            self.shooting_star_chance = defaults.shooting_star_chance;
            reset.push("starfield.shootingStarChance");
        }
        if !self.shooting_star_fade.is_finite() || self.shooting_star_fade <= 0.0 {
            self.shooting_star_fade = defaults.shooting_star_fade;
            reset.push("starfield.shootingStarFade");
        }
        reset
    }
}

impl SiteConfig {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => Ok(serde_json::from_str(json)?),
        }
    }

    /// Resets out-of-range values to their defaults, naming each one reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = self.starfield.sanitize();
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            self.mobile_breakpoint = MOBILE_BREAKPOINT;
            reset.push("mobileBreakpoint");
        }
        reset
    }

    /// Reads overrides from the body attribute. Bad JSON and out-of-range
    /// values are reported and replaced by defaults.
    pub fn load(document: &web_sys::Document) -> Self {
        let raw = document.body().and_then(|b| b.get_attribute(CONFIG_ATTRIBUTE));
        let mut config = match Self::parse(raw.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::warn_1(&format!("{}, using defaults", e).into());
                return Self::default();
            }
        };
        for field in config.sanitize() {
            web_sys::console::warn_1(&format!("{} out of range, using default", field).into());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_attribute_yields_defaults() {
        assert_eq!(SiteConfig::parse(None).unwrap(), SiteConfig::default());
        assert_eq!(SiteConfig::parse(Some("  ")).unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::parse(Some(
            r#"{"typingEffect": true, "starfield": {"starDensity": 1500}}"#,
        ))
        .unwrap();

        assert!(config.typing_effect);
        assert_eq!(config.starfield.star_density, 1500.0);
        assert_eq!(config.starfield.container_id, "starfield");
        assert_eq!(config.starfield.shooting_star_chance, 0.002);
        assert_eq!(config.mobile_breakpoint, 768.0);
    }

    #[test]
    fn sanitize_keeps_valid_overrides() {
        let mut config = SiteConfig::parse(Some(
            r#"{"starfield": {
                "starDensity": 1,
                "shootingStarChance": 1,
                "shootingStarFade": 0.5
            }}"#,
        ))
        .unwrap();

        assert!(config.sanitize().is_empty());
        assert_eq!(config.starfield.star_density, 1.0);
        assert_eq!(config.starfield.shooting_star_chance, 1.0);
        assert_eq!(config.starfield.shooting_star_fade, 0.5);
    }

    #[test]
    fn sanitize_resets_tiny_star_density() {
        let mut config = SiteConfig::parse(Some(r#"{"starfield": {"starDensity": 0.000001}}"#))
            .unwrap();

        assert_eq!(config.sanitize(), vec!["starfield.starDensity"]);
        assert_eq!(config.starfield.star_density, STAR_DENSITY);
    }

    #[test]
    fn sanitize_resets_non_positive_fade() {
        for fade in [0.0, -0.5] {
            let mut config = StarfieldConfig {
                shooting_star_fade: fade,
                ..StarfieldConfig::default()
            };
            assert_eq!(config.sanitize(), vec!["starfield.shootingStarFade"]);
            assert_eq!(config.shooting_star_fade, SHOOTING_STAR_FADE);
        }
    }

    #[test]
    fn sanitize_resets_chance_outside_unit_interval() {
        for chance in [-0.1, 1.5, f64::NAN] {
            let mut config = StarfieldConfig {
                shooting_star_chance: chance,
                ..StarfieldConfig::default()
            };
            assert_eq!(config.sanitize(), vec!["starfield.shootingStarChance"]);
            assert_eq!(config.shooting_star_chance, SHOOTING_STAR_CHANCE);
        }
    }

    #[test]
    fn sanitize_reports_every_reset_field() {
        let mut config = SiteConfig::parse(Some(
            r#"{
                "mobileBreakpoint": -1,
                "starfield": {"starDensity": 0, "shootingStarChance": 2, "shootingStarFade": 0}
            }"#,
        ))
        .unwrap();

        assert_eq!(
            config.sanitize(),
            vec![
                "starfield.starDensity",
                "starfield.shootingStarChance",
                "starfield.shootingStarFade",
                "mobileBreakpoint",
            ]
        );
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::parse(Some("{not json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

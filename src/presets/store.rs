use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    animation::driver::AnimationConfig,
    encode::ffmpeg::ensure_parent_dir,
    foundation::core::Rgb8,
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::params::SpiralParameters,
    project::frame::{RenderMode, StyleConfig},
    scene::Scene,
};

/// Environment variable overriding where presets are stored.
pub const PRESETS_PATH_ENV: &str = "ARCHIMEDES_PRESETS";
pub const DEFAULT_PRESETS_FILE: &str = "archimedes_presets.json";

/// Named bundle of everything a user can tune, minus the output viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Preset {
    pub mode: RenderMode,
    pub params: SpiralParameters,
    pub style: StyleConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    pub field_of_view: f64,
}

impl Preset {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            mode: scene.mode,
            params: scene.params,
            style: scene.style,
            animation: scene.animation,
            field_of_view: scene.projection.field_of_view,
        }
    }

    /// Overwrite the tunable parts of `scene`, keeping its viewport and scale.
    pub fn apply_to(&self, scene: &mut Scene) {
        scene.mode = self.mode;
        scene.params = self.params;
        scene.style = self.style;
        scene.animation = self.animation;
        scene.projection.field_of_view = self.field_of_view;
    }

    pub fn to_scene(&self) -> Scene {
        let mut scene = Scene::default();
        self.apply_to(&mut scene);
        scene
    }
}

/// Presets that are always present and cannot be deleted.
pub fn builtin_presets() -> BTreeMap<String, Preset> {
    let teal = Rgb8::new(0x2d, 0xd4, 0xbf);
    let classic = Preset {
        mode: RenderMode::Flat,
        params: SpiralParameters {
            turns: 12,
            growth_rate: 6.0,
            z_per_turn: 140.0,
            ..SpiralParameters::default()
        },
        style: StyleConfig {
            line_width: 2.0,
            color: teal,
            ..StyleConfig::default()
        },
        animation: AnimationConfig::default(),
        field_of_view: 700.0,
    };
    let dots = Preset {
        params: SpiralParameters {
            turns: 16,
            growth_rate: 4.0,
            ..classic.params
        },
        style: StyleConfig {
            color: Rgb8::new(0xea, 0xf1, 0xff),
            points: true,
            ..classic.style
        },
        ..classic.clone()
    };
    let show = Preset {
        mode: RenderMode::Perspective,
        params: SpiralParameters {
            turns: 14,
            z_per_turn: 160.0,
            ..classic.params
        },
        animation: AnimationConfig {
            speed_y: 18.0,
            ..AnimationConfig::default()
        },
        field_of_view: 740.0,
        ..classic.clone()
    };

    BTreeMap::from([
        ("Classico".to_string(), classic),
        ("Punti".to_string(), dots),
        ("Demo Show".to_string(), show),
    ])
}

pub fn is_builtin(name: &str) -> bool {
    builtin_presets().contains_key(name)
}

/// JSON-file-backed map of preset name to [`Preset`].
#[derive(Clone, Debug)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$ARCHIMEDES_PRESETS`, or `archimedes_presets.json` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(PRESETS_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRESETS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored presets merged over the built-ins.
    ///
    /// A missing file yields only the built-ins. A corrupt file is logged and ignored.
    pub fn load(&self) -> ArchimedesResult<BTreeMap<String, Preset>> {
        let mut all = match std::fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, Preset>>(&text) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        %err,
                        "preset file is not valid json; using built-in presets"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("read presets '{}'", self.path.display()))
                    .into());
            }
        };
        for (name, preset) in builtin_presets() {
            all.entry(name).or_insert(preset);
        }
        Ok(all)
    }

    pub fn get(&self, name: &str) -> ArchimedesResult<Preset> {
        self.load()?.remove(name).ok_or_else(|| {
            ArchimedesError::invalid_parameter(format!("no preset named '{name}'"))
        })
    }

    pub fn names(&self) -> ArchimedesResult<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Insert or replace `name`. The name is trimmed and must not be empty.
    pub fn save(&self, name: &str, preset: &Preset) -> ArchimedesResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ArchimedesError::invalid_parameter(
                "preset name must not be empty",
            ));
        }
        preset.params.validate()?;
        preset.style.validate()?;
        preset.animation.validate()?;
        if !preset.field_of_view.is_finite() || preset.field_of_view <= 0.0 {
            return Err(ArchimedesError::invalid_parameter(
                "preset field_of_view must be finite and > 0",
            ));
        }

        let mut all = self.load()?;
        all.insert(name.to_string(), preset.clone());
        self.write(&all)?;
        Ok(name.to_string())
    }

    /// Remove a user preset. Built-ins cannot be deleted.
    pub fn delete(&self, name: &str) -> ArchimedesResult<()> {
        if is_builtin(name) {
            return Err(ArchimedesError::invalid_parameter(format!(
                "built-in preset '{name}' cannot be deleted"
            )));
        }
        let mut all = self.load()?;
        if all.remove(name).is_none() {
            return Err(ArchimedesError::invalid_parameter(format!(
                "no preset named '{name}'"
            )));
        }
        self.write(&all)
    }

    fn write(&self, all: &BTreeMap<String, Preset>) -> ArchimedesResult<()> {
        let text =
            serde_json::to_string_pretty(all).map_err(|e| ArchimedesError::serde(e.to_string()))?;
        ensure_parent_dir(&self.path)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)
            .with_context(|| format!("write presets '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace presets '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/store.rs"]
mod tests;

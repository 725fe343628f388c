//! Catalog data types and their JSON representation

use bevy::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Ordered planet definitions. The index of an entry is the key used to
/// correlate it with the entities spawned for it.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
pub struct PlanetCatalog {
    pub planets: Vec<PlanetDef>,
}

/// One planet as authored in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetDef {
    pub name: String,
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub color: Color,
    /// Body radius in km
    pub radius: f32,
    /// Orbit radius in km
    pub distance_from_sun: f32,
    /// Degrees
    pub axial_tilt: f32,
    /// Radians added to the spin angle each frame
    pub rotation_speed: f32,
    pub orbit_speed: f32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(deserialize_with = "deserialize_rings")]
    pub rings: RingSpec,
}

/// Physical ring system, radii in km.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingDef {
    #[serde(rename = "innerradius")]
    pub inner_radius: f32,
    #[serde(rename = "outerradius")]
    pub outer_radius: f32,
    pub texture: String,
    #[serde(rename = "transTexture", default)]
    pub mask_texture: Option<String>,
}

/// Ring declaration of a planet.
///
/// Ring data is optional, so a bad ring entry never rejects the catalog; it is
/// kept as `Malformed` and the scene builder skips the ring.
#[derive(Debug, Clone, PartialEq)]
pub enum RingSpec {
    None,
    Declared(RingDef),
    Malformed(String),
}

impl RingSpec {
    pub fn declared(&self) -> Option<&RingDef> {
        match self {
            RingSpec::Declared(def) => Some(def),
            _ => None,
        }
    }

    /// Interpret the `[flag, {ring}]` array used by the catalog file.
    pub fn from_entries(entries: &[Value]) -> Self {
        let Some(flag) = entries.first() else {
            return RingSpec::None;
        };
        if !is_truthy(flag) {
            return RingSpec::None;
        }
        let Some(raw) = entries.get(1) else {
            return RingSpec::Malformed("ring flag set but no ring data".to_string());
        };
        match RingDef::deserialize(raw) {
            Ok(def) => match def.check() {
                Ok(()) => RingSpec::Declared(def),
                Err(reason) => RingSpec::Malformed(reason),
            },
            Err(err) => RingSpec::Malformed(err.to_string()),
        }
    }
}

impl RingDef {
    fn check(&self) -> Result<(), String> {
        if !self.inner_radius.is_finite() || !self.outer_radius.is_finite() {
            return Err("ring radii must be finite".to_string());
        }
        if self.inner_radius < 0.0 {
            return Err(format!("negative inner radius {}", self.inner_radius));
        }
        if self.outer_radius <= self.inner_radius {
            return Err(format!(
                "outer radius {} must exceed inner radius {}",
                self.outer_radius, self.inner_radius
            ));
        }
        Ok(())
    }
}

/// Loose truthiness for the ring flag (`false`, `null`, `0` and `""` are falsy).
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn deserialize_rings<'de, D>(deserializer: D) -> Result<RingSpec, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(RingSpec::from_entries(&entries))
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Srgba::hex(&raw)
        .map(Color::from)
        .map_err(|err| serde::de::Error::custom(format!("invalid color {raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn planet_json(rings: Value) -> Value {
        json!({
            "name": "Saturn",
            "color": "#e3d3a3",
            "radius": 58232.0,
            "distance_from_sun": 1432000000.0,
            "axial_tilt": 26.73,
            "rotation_speed": 0.042,
            "orbit_speed": 0.034,
            "texture": "textures/saturn.jpg",
            "rings": rings
        })
    }

    #[test]
    fn falsy_ring_flag_means_no_rings() {
        for flag in [json!(false), json!(null), json!(0), json!("")] {
            let def: PlanetDef = serde_json::from_value(planet_json(json!([flag]))).unwrap();
            assert_eq!(def.rings, RingSpec::None);
        }
    }

    #[test]
    fn declared_rings_are_parsed() {
        let rings = json!([true, {
            "innerradius": 74500.0,
            "outerradius": 140220.0,
            "texture": "textures/saturn_ring.png",
            "transTexture": "textures/saturn_ring_alpha.png"
        }]);
        let def: PlanetDef = serde_json::from_value(planet_json(rings)).unwrap();
        let ring = def.rings.declared().expect("rings should be declared");
        assert_eq!(ring.inner_radius, 74500.0);
        assert_eq!(ring.outer_radius, 140220.0);
        assert_eq!(
            ring.mask_texture.as_deref(),
            Some("textures/saturn_ring_alpha.png")
        );
    }

    #[test]
    fn null_mask_texture_is_accepted() {
        let rings = json!([true, {
            "innerradius": 38000.0,
            "outerradius": 51149.0,
            "texture": "textures/uranus_ring.png",
            "transTexture": null
        }]);
        let def: PlanetDef = serde_json::from_value(planet_json(rings)).unwrap();
        assert_eq!(def.rings.declared().unwrap().mask_texture, None);
    }

    #[test]
    fn malformed_rings_do_not_reject_the_planet() {
        let missing = serde_json::from_value::<PlanetDef>(planet_json(json!([true]))).unwrap();
        assert!(matches!(missing.rings, RingSpec::Malformed(_)));

        let inverted = json!([true, {
            "innerradius": 2.0,
            "outerradius": 1.0,
            "texture": "ring.png"
        }]);
        let def: PlanetDef = serde_json::from_value(planet_json(inverted)).unwrap();
        assert!(matches!(def.rings, RingSpec::Malformed(_)));

        let wrong_shape = json!([true, "not a ring"]);
        let def: PlanetDef = serde_json::from_value(planet_json(wrong_shape)).unwrap();
        assert!(matches!(def.rings, RingSpec::Malformed(_)));
    }

    #[test]
    fn missing_rings_field_is_an_error() {
        let mut value = planet_json(json!([false]));
        value.as_object_mut().unwrap().remove("rings");
        assert!(serde_json::from_value::<PlanetDef>(value).is_err());
    }

    #[test]
    fn hex_colors_are_parsed() {
        let def: PlanetDef = serde_json::from_value(planet_json(json!([false]))).unwrap();
        let srgba = def.color.to_srgba();
        assert!((srgba.red - 0xe3 as f32 / 255.0).abs() < 1e-4);
        assert!((srgba.blue - 0xa3 as f32 / 255.0).abs() < 1e-4);

        let mut value = planet_json(json!([false]));
        value["color"] = json!("not-a-color");
        assert!(serde_json::from_value::<PlanetDef>(value).is_err());
    }

    #[test]
    fn active_and_texture_default_when_absent() {
        let mut value = planet_json(json!([false]));
        value.as_object_mut().unwrap().remove("texture");
        let def: PlanetDef = serde_json::from_value(value).unwrap();
        assert!(!def.active);
        assert!(def.texture.is_none());
    }
}

//! Material constants used for weight and capacity estimates.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Kinds of material a piece can be built from.
///
/// Unrecognised names deserialize to [`MaterialKind::Unknown`], which is analysed
/// with the baseline wood profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKind {
    /// Solid softwood boards.
    #[default]
    Wood,
    /// Plywood sheet goods.
    Plywood,
    /// Medium density fibreboard.
    Mdf,
    /// Particleboard.
    Particleboard,
    /// Carpet-wrapped board.
    Carpet,
    /// Sisal rope wrapped post.
    Sisal,
    /// Cardboard tubes and boxes.
    Cardboard,
    /// Fabric beds and hammocks.
    Fabric,
    /// PVC pipe.
    Pvc,
    /// Steel or aluminium hardware.
    Metal,
    /// Anything not listed above.
    #[serde(other)]
    Unknown,
}

impl MaterialKind {
    /// Every catalogued kind, excluding [`MaterialKind::Unknown`].
    pub const ALL: [MaterialKind; 10] = [
        MaterialKind::Wood,
        MaterialKind::Plywood,
        MaterialKind::Mdf,
        MaterialKind::Particleboard,
        MaterialKind::Carpet,
        MaterialKind::Sisal,
        MaterialKind::Cardboard,
        MaterialKind::Fabric,
        MaterialKind::Pvc,
        MaterialKind::Metal,
    ];
}

/// Physical constants for one material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProfile {
    /// Load the material bears per square inch of footprint, in pounds.
    pub base_capacity: f64,
    /// Tensile strength in psi.
    pub tensile_strength: f64,
    /// Shear strength in psi.
    pub shear_strength: f64,
    /// Density in pounds per cubic inch.
    pub density: f64,
    /// Quality factor of fastened joints, between 0 and 1.
    pub joint_efficiency: f64,
}

impl MaterialProfile {
    /// Built-in constants for `kind`. [`MaterialKind::Unknown`] maps to wood.
    #[must_use]
    pub const fn builtin(kind: MaterialKind) -> Self {
        let (base_capacity, tensile_strength, shear_strength, density, joint_efficiency) =
            match kind {
                MaterialKind::Wood | MaterialKind::Unknown => (50.0, 5_000.0, 900.0, 0.018, 0.8),
                MaterialKind::Plywood => (45.0, 4_500.0, 800.0, 0.02, 0.85),
                MaterialKind::Mdf => (30.0, 2_000.0, 400.0, 0.027, 0.6),
                MaterialKind::Particleboard => (20.0, 1_500.0, 300.0, 0.024, 0.5),
                MaterialKind::Carpet => (40.0, 4_000.0, 700.0, 0.02, 0.75),
                MaterialKind::Sisal => (35.0, 3_500.0, 600.0, 0.025, 0.7),
                MaterialKind::Cardboard => (2.0, 300.0, 50.0, 0.004, 0.3),
                MaterialKind::Fabric => (0.1, 150.0, 20.0, 0.002, 0.2),
                MaterialKind::Pvc => (25.0, 7_000.0, 1_000.0, 0.05, 0.6),
                MaterialKind::Metal => (200.0, 36_000.0, 20_000.0, 0.28, 0.95),
            };
        Self {
            base_capacity,
            tensile_strength,
            shear_strength,
            density,
            joint_efficiency,
        }
    }
}

/// Immutable lookup from material kind to its profile.
///
/// Deserialized tables only override the kinds they list; every other kind
/// keeps its built-in profile.
///
/// # Examples
/// ```
/// use cattree::{MaterialKind, MaterialTable};
///
/// let table = MaterialTable::default();
/// let unknown = table.profile(Some(MaterialKind::Unknown));
/// assert_eq!(unknown, table.profile(None));
/// assert_eq!(unknown, table.profile(Some(MaterialKind::Wood)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaterialTable {
    /// Profiles keyed by kind.
    profiles: HashMap<MaterialKind, MaterialProfile>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            profiles: MaterialKind::ALL
                .iter()
                .map(|&kind| (kind, MaterialProfile::builtin(kind)))
                .collect(),
        }
    }
}

impl MaterialTable {
    /// Kind used whenever a piece has no material or an unlisted one.
    pub const BASELINE: MaterialKind = MaterialKind::Wood;

    /// Build a table from explicit profiles layered over the built-in ones.
    #[must_use]
    pub fn from_profiles(profiles: impl IntoIterator<Item = (MaterialKind, MaterialProfile)>) -> Self {
        profiles
            .into_iter()
            .fold(Self::default(), |table, (kind, profile)| table.with_profile(kind, profile))
    }

    /// Profile for `kind`. Missing and unknown kinds use the baseline profile.
    #[must_use]
    pub fn profile(&self, kind: Option<MaterialKind>) -> MaterialProfile {
        let kind = match kind {
            None | Some(MaterialKind::Unknown) => Self::BASELINE,
            Some(kind) => kind,
        };
        self.profiles
            .get(&kind)
            .copied()
            .unwrap_or_else(|| MaterialProfile::builtin(kind))
    }

    /// Replace the profile of one kind, returning the updated table.
    #[must_use]
    pub fn with_profile(mut self, kind: MaterialKind, profile: MaterialProfile) -> Self {
        self.profiles.insert(kind, profile);
        self
    }
}

impl<'de> Deserialize<'de> for MaterialTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = HashMap::<MaterialKind, MaterialProfile>::deserialize(deserializer)?;
        Ok(Self::from_profiles(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogued_kind_has_a_profile() {
        let table = MaterialTable::default();
        for kind in MaterialKind::ALL {
            assert_eq!(table.profile(Some(kind)), MaterialProfile::builtin(kind));
        }
    }

    #[test]
    fn fabric_is_far_weaker_than_wood() {
        let table = MaterialTable::default();
        let fabric = table.profile(Some(MaterialKind::Fabric));
        let wood = table.profile(Some(MaterialKind::Wood));
        assert!(fabric.base_capacity * 100.0 < wood.base_capacity);
    }

    #[test]
    fn partial_table_keeps_builtin_profiles() {
        let stiff_metal = MaterialProfile {
            base_capacity: 400.0,
            ..MaterialProfile::builtin(MaterialKind::Metal)
        };
        let table = MaterialTable::from_profiles([(MaterialKind::Metal, stiff_metal)]);
        assert_eq!(table.profile(Some(MaterialKind::Metal)), stiff_metal);
        assert_eq!(
            table.profile(Some(MaterialKind::Fabric)),
            MaterialProfile::builtin(MaterialKind::Fabric)
        );
    }

    #[test]
    fn json_override_of_one_kind_leaves_fabric_weak() {
        let table: MaterialTable = serde_json::from_str(
            r#"{"metal": {"baseCapacity": 250.0, "tensileStrength": 36000.0,
                "shearStrength": 20000.0, "density": 0.28, "jointEfficiency": 0.95}}"#,
        )
        .expect("valid table");
        assert_eq!(table.profile(Some(MaterialKind::Metal)).base_capacity, 250.0);
        assert_eq!(table.profile(Some(MaterialKind::Fabric)).base_capacity, 0.1);
        assert_eq!(table.profile(None), MaterialProfile::builtin(MaterialKind::Wood));
    }

    #[test]
    fn unrecognised_names_deserialize_to_unknown() {
        let kind: MaterialKind = serde_json::from_str("\"bamboo\"").expect("valid json");
        assert_eq!(kind, MaterialKind::Unknown);
        let kind: MaterialKind = serde_json::from_str("\"plywood\"").expect("valid json");
        assert_eq!(kind, MaterialKind::Plywood);
    }

    #[test]
    fn json_overrides_single_kind() {
        let table: MaterialTable = serde_json::from_str(
            r#"{"wood": {"baseCapacity": 10.0, "tensileStrength": 1.0,
                "shearStrength": 1.0, "density": 0.01, "jointEfficiency": 0.5}}"#,
        )
        .expect("valid table");
        assert_eq!(table.profile(None).base_capacity, 10.0);
    }
}

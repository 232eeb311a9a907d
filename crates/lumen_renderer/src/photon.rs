//! Photons and the two photon maps filled by the transport pass.

use lumen_math::{Color, Vec3};
use lumen_scene::SurfaceId;

/// A recorded light-transport event on a diffuse surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    pub position: Vec3,
    /// Unit vector pointing back along the incoming path.
    pub direction: Vec3,
    /// Radiant power carried by the photon.
    pub power: Color,
    /// Surface the photon landed on.
    pub surface: SurfaceId,
}

/// Which photon map a hit is recorded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    /// Paths that scattered diffusely at least once.
    Diffuse,
    /// Paths that went through glass and have not scattered diffusely yet.
    Caustic,
}

impl Store {
    /// Map for a photon landing on a diffuse surface, given its history.
    ///
    /// Paths that did both are dropped, and so are direct hits unless
    /// `store_direct` is set (direct light is integrated analytically).
    pub fn classify(
        has_diffused: bool,
        has_caustic_bounced: bool,
        store_direct: bool,
    ) -> Option<Store> {
        match (has_diffused, has_caustic_bounced) {
            (true, false) => Some(Store::Diffuse),
            (false, true) => Some(Store::Caustic),
            (false, false) if store_direct => Some(Store::Diffuse),
            _ => None,
        }
    }
}

/// The diffuse and caustic photon collections.
///
/// Append-only while photons are traced, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PhotonMaps {
    pub diffuse: Vec<Photon>,
    pub caustic: Vec<Photon>,
}

impl PhotonMaps {
    /// Append a photon to the given map.
    pub fn record(&mut self, store: Store, photon: Photon) {
        match store {
            Store::Diffuse => self.diffuse.push(photon),
            Store::Caustic => self.caustic.push(photon),
        }
    }

    /// Total number of stored photons.
    pub fn len(&self) -> usize {
        self.diffuse.len() + self.caustic.len()
    }

    /// True if no photon was stored in either map.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sum of the power carried by `photons`.
pub fn total_power(photons: &[Photon]) -> Color {
    photons.iter().map(|p| p.power).sum()
}

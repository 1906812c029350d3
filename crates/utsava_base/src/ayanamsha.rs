//! Ayanamsha for the sidereal zodiacs the angams are measured in.
//!
//! Each system is defined by its J2000.0 reference value. The ayanamsha at
//! any epoch adds the IAU 2006 general precession in longitude to that
//! reference.

use serde::{Deserialize, Serialize};

use crate::calendar::jd_to_centuries;

/// Sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamshaSystem {
    /// Spica (Chitra) held at exactly 180 deg sidereal.
    #[default]
    ChitraAt180,
    /// Lahiri (Chitrapaksha), Calendar Reform Committee 1957.
    Lahiri,
    /// Krishnamurti Paddhati.
    Krishnamurti,
    /// B.V. Raman.
    Raman,
    /// Fagan-Bradley.
    FaganBradley,
    /// Sri Yukteshwar, "The Holy Science".
    Yukteshwar,
}

const ALL_SYSTEMS: [AyanamshaSystem; 6] = [
    AyanamshaSystem::ChitraAt180,
    AyanamshaSystem::Lahiri,
    AyanamshaSystem::Krishnamurti,
    AyanamshaSystem::Raman,
    AyanamshaSystem::FaganBradley,
    AyanamshaSystem::Yukteshwar,
];

impl AyanamshaSystem {
    /// Reference ayanamsha at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::ChitraAt180 => 23.857,
            Self::Lahiri => 23.853,
            Self::Krishnamurti => 23.850,
            Self::Raman => 22.370,
            Self::FaganBradley => 24.736,
            Self::Yukteshwar => 22.376,
        }
    }

    pub const fn all() -> &'static [AyanamshaSystem] {
        &ALL_SYSTEMS
    }
}

/// IAU 2006 general precession in ecliptic longitude, in degrees.
///
/// `t` is Julian centuries since J2000.0.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    (5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3) / 3600.0
}

/// Ayanamsha in degrees at a Julian Date.
pub fn ayanamsha_deg(system: AyanamshaSystem, jd: f64) -> f64 {
    system.reference_j2000_deg() + general_precession_longitude_deg(jd_to_centuries(jd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::J2000_JD;

    #[test]
    fn reference_at_epoch() {
        for s in AyanamshaSystem::all() {
            assert!((ayanamsha_deg(*s, J2000_JD) - s.reference_j2000_deg()).abs() < 1e-12);
        }
    }

    #[test]
    fn grows_about_1_4_deg_per_century() {
        let a0 = ayanamsha_deg(AyanamshaSystem::Lahiri, J2000_JD);
        let a1 = ayanamsha_deg(AyanamshaSystem::Lahiri, J2000_JD + 36_525.0);
        assert!((a1 - a0 - 1.3969).abs() < 0.001);
    }

    #[test]
    fn default_is_chitra() {
        assert_eq!(AyanamshaSystem::default(), AyanamshaSystem::ChitraAt180);
    }
}

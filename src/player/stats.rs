// Counting stat totals and pure rate-stat derivation.
//
// Rate stats are never stored: they are always recomputed from the
// underlying counting components. All derivations return `None` when the
// denominator is zero, which means "insufficient sample" and is distinct
// from zero performance.

use serde::{Deserialize, Serialize};

/// Projected (or accumulated) counting totals for one player.
///
/// Hitting and pitching fields live side by side; a pure hitter simply has
/// all pitching fields at zero and vice versa. Extra-base hits are a single
/// lump (the data model does not split doubles from triples), so total
/// bases are approximated as `H + XBH + 2*HR`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    // Hitting
    #[serde(default)]
    pub pa: u32,
    #[serde(default)]
    pub ab: u32,
    #[serde(default)]
    pub h: u32,
    #[serde(default)]
    pub xbh: u32,
    #[serde(default)]
    pub hr: u32,
    #[serde(default)]
    pub r: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub sb: u32,
    #[serde(default)]
    pub cs: u32,
    #[serde(default)]
    pub bb: u32,
    #[serde(default)]
    pub so: u32,

    // Pitching
    #[serde(default)]
    pub ip: f64,
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub l: u32,
    #[serde(default)]
    pub sv: u32,
    #[serde(default)]
    pub qs: u32,
    #[serde(default)]
    pub er: u32,
    #[serde(default)]
    pub ha: u32,
    #[serde(default)]
    pub bba: u32,
    #[serde(default)]
    pub k: u32,
}

impl PlayerStats {
    /// Approximate total bases: every hit is at least one base, every
    /// extra-base hit adds one more, and home runs add two beyond that.
    pub fn total_bases(&self) -> u32 {
        self.h + self.xbh + 2 * self.hr
    }

    /// Batting average. `None` when there are no at-bats.
    pub fn avg(&self) -> Option<f64> {
        ratio(self.h as f64, self.ab as f64)
    }

    /// On-base percentage, from hits and walks over (AB + BB).
    pub fn obp(&self) -> Option<f64> {
        ratio((self.h + self.bb) as f64, (self.ab + self.bb) as f64)
    }

    /// Slugging percentage from approximate total bases.
    pub fn slg(&self) -> Option<f64> {
        ratio(self.total_bases() as f64, self.ab as f64)
    }

    /// OPS = OBP + SLG. `None` when either component is missing.
    pub fn ops(&self) -> Option<f64> {
        Some(self.obp()? + self.slg()?)
    }

    /// Earned run average. `None` when no innings have been pitched.
    pub fn era(&self) -> Option<f64> {
        ratio(self.er as f64 * 9.0, self.ip)
    }

    /// Walks plus hits per inning pitched. `None` without innings.
    pub fn whip(&self) -> Option<f64> {
        ratio((self.ha + self.bba) as f64, self.ip)
    }

    /// Merge two stat lines by summing the counting components.
    ///
    /// This is the only correct way to combine stat lines for simulation:
    /// the caller recomputes rate stats from the merged components. Two
    /// rate stats are never merged by averaging.
    pub fn combine(&self, other: &PlayerStats) -> PlayerStats {
        PlayerStats {
            pa: self.pa + other.pa,
            ab: self.ab + other.ab,
            h: self.h + other.h,
            xbh: self.xbh + other.xbh,
            hr: self.hr + other.hr,
            r: self.r + other.r,
            rbi: self.rbi + other.rbi,
            sb: self.sb + other.sb,
            cs: self.cs + other.cs,
            bb: self.bb + other.bb,
            so: self.so + other.so,
            ip: self.ip + other.ip,
            w: self.w + other.w,
            l: self.l + other.l,
            sv: self.sv + other.sv,
            qs: self.qs + other.qs,
            er: self.er + other.er,
            ha: self.ha + other.ha,
            bba: self.bba + other.bba,
            k: self.k + other.k,
        }
    }
}

/// Divide with a `None` result for a zero (or non-positive) denominator.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

//! Priority tables over the four kaala samples.
//!
//! Samples are `[today start, today end, tomorrow start, tomorrow end]`.
//! `p`, `q` and `r` below are the angam before the target, the target
//! and the angam after it.

use utsava_base::AngamNeighbours;
use utsava_series::Kaala;

use crate::rule::Priority;

/// What a priority table says about day `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Assign to `d + offset`.
    Assign(i64),
    /// Assign to `d + offset` although the target touched neither window.
    AssignUntouched(i64),
    /// `[p, q, q, r]` under vyaapti: compare overlaps of both windows.
    CompareOverlap,
    /// Puurvaviddha hit on a day whose predecessor already holds the
    /// festival.
    AlreadyAssigned,
    /// No branch matched.
    NoMatch,
}

/// Apply `priority` to `samples`.
///
/// `assigned(k)` tells whether the festival already holds `d + k`.
pub fn decide(
    priority: Priority,
    samples: [u8; 4],
    nb: AngamNeighbours,
    kaala: Kaala,
    assigned: impl Fn(i64) -> bool,
) -> Outcome {
    match priority {
        Priority::Puurvaviddha => puurvaviddha(samples, nb, kaala, assigned),
        Priority::Paraviddha => paraviddha(samples, nb, kaala),
        Priority::Vyaapti => vyaapti(samples, nb),
    }
}

/// The earlier day whose window the target touches.
pub fn puurvaviddha(
    s: [u8; 4],
    nb: AngamNeighbours,
    kaala: Kaala,
    assigned: impl Fn(i64) -> bool,
) -> Outcome {
    let (p, q, r) = (nb.prev, nb.target, nb.next);
    if s[0] == q || s[1] == q {
        if assigned(-1) {
            Outcome::AlreadyAssigned
        } else {
            Outcome::Assign(0)
        }
    } else if s[2] == q || s[3] == q {
        Outcome::Assign(1)
    } else if s == [p, p, r, r] {
        // The target lies wholly between the two windows.
        let offset = if kaala.is_rise_instant() { 0 } else { 1 };
        if assigned(offset - 1) {
            Outcome::AlreadyAssigned
        } else {
            Outcome::AssignUntouched(offset)
        }
    } else {
        Outcome::NoMatch
    }
}

/// The later day whose window the target touches.
pub fn paraviddha(s: [u8; 4], nb: AngamNeighbours, kaala: Kaala) -> Outcome {
    let (p, q, r) = (nb.prev, nb.target, nb.next);
    if (s[1] == q && s[3] == q) || (s[2] == q && s[3] == q) {
        Outcome::Assign(1)
    } else if s[0] == q && s[1] == q {
        Outcome::Assign(0)
    } else if s[1] == q || s[2] == q {
        Outcome::Assign(0)
    } else if s[0] == q && s[1] == r {
        Outcome::Assign(if kaala == Kaala::Aparaahna { 0 } else { -1 })
    } else if s[1] == p && s[2] == r {
        Outcome::AssignUntouched(0)
    } else {
        Outcome::NoMatch
    }
}

/// The day whose window the target covers longest.
pub fn vyaapti(s: [u8; 4], nb: AngamNeighbours) -> Outcome {
    let (p, q, r) = (nb.prev, nb.target, nb.next);
    if [[p, p, q, q], [p, q, q, q], [q, q, q, q], [p, p, q, r], [p, p, r, r]].contains(&s) {
        Outcome::Assign(1)
    } else if [[p, q, r, r], [q, q, q, r], [q, q, r, r]].contains(&s) {
        Outcome::Assign(0)
    } else if s == [p, q, q, r] {
        Outcome::CompareOverlap
    } else {
        Outcome::NoMatch
    }
}

/// Offset chosen from the target's overlap (any unit) with today's and
/// tomorrow's window. Ties stay on today.
pub fn overlap_choice(today: f64, tomorrow: f64) -> i64 {
    if tomorrow > today { 1 } else { 0 }
}

/// Whether a [`Outcome::NoMatch`] deserves a report.
///
/// Most non-matching patterns are days far from the target; only those
/// near it, for a festival not yet assigned anywhere, are reported.
pub fn report_no_match(
    priority: Priority,
    s: [u8; 4],
    nb: AngamNeighbours,
    already_assigned: bool,
) -> bool {
    if already_assigned {
        return false;
    }
    match priority {
        Priority::Puurvaviddha => s != [nb.prev; 4],
        Priority::Paraviddha => s[3] > nb.target,
        Priority::Vyaapti => false,
    }
}

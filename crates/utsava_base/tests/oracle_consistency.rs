//! Cross-checks of the oracle queries against the reference ephemeris.

use utsava_base::{
    AngamKind, AyanamshaSystem, Ephemeris, GeoLocation, MeanMotionEphemeris, RiseSetEvent,
    angam_at, angam_span, angam_transitions, calendar_to_jd, local_midnight_jd,
};

fn eph() -> MeanMotionEphemeris {
    MeanMotionEphemeris::new(GeoLocation::new(12.97, 77.59, 900.0), AyanamshaSystem::ChitraAt180)
        .unwrap()
}

#[test]
fn first_transition_matches_sunrise_angam() {
    let e = eph();
    let mut midnight = local_midnight_jd(calendar_to_jd(2023, 3, 1.0), 5.5);
    for _ in 0..40 {
        let sr = e.next_event(midnight, RiseSetEvent::Sunrise).unwrap();
        let sr_next = e.next_event(sr + 0.5, RiseSetEvent::Sunrise).unwrap();
        for kind in AngamKind::all() {
            let tr = angam_transitions(&e, sr, sr_next, *kind).unwrap();
            assert!(!tr.is_empty() && tr.len() <= 5, "{kind}: {tr:?}");
            assert_eq!(tr[0].angam, angam_at(&e, sr, *kind).unwrap(), "{kind}");
            for w in tr.windows(2) {
                let (a, b) = (w[0].end.unwrap(), w[1].end.unwrap());
                assert!(a < b, "{kind}: ends not increasing");
            }
            for t in &tr {
                if let Some(end) = t.end {
                    assert!(end >= sr && end <= sr_next, "{kind}: end outside day");
                }
            }
        }
        midnight += 1.0;
    }
}

#[test]
fn new_moon_spans_are_a_lunation_apart() {
    let e = eph();
    let jd = calendar_to_jd(2023, 1, 1.0);
    let first = angam_span(&e, jd, jd + 32.0, AngamKind::Tithi, 30).unwrap().unwrap();
    let second = angam_span(&e, first.end + 24.0, first.end + 32.0, AngamKind::Tithi, 30)
        .unwrap()
        .unwrap();
    let lunation = second.end - first.end;
    assert!((lunation - 29.53).abs() < 0.5, "lunation {lunation}");
    assert!(first.duration() > 0.7 && first.duration() < 1.2);
}

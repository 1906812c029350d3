//! Name tables used to build festival names (Harvard-Kyoto spelling).

use utsava_series::LunarMonth;

/// Lunar (chandra) month names, caitra first.
pub const LUNAR_MONTH_NAMES: [&str; 12] = [
    "caitra",
    "vaizAkha",
    "jyESTha",
    "ASADha",
    "zrAvaNa",
    "bhAdrapada",
    "Azvayuja",
    "kArttika",
    "mArgazIrSa",
    "pauSa",
    "mAgha",
    "phAlguna",
];

/// Nakshatra names, azvinI first.
pub const NAKSHATRA_NAMES: [&str; 27] = [
    "azvinI",
    "bharaNI",
    "kRttikA",
    "rOhiNI",
    "mRgazIrSa",
    "ArdrA",
    "punarvasu",
    "puSya",
    "AzlESA",
    "maghA",
    "pUrvaphalgunI",
    "uttaraphalgunI",
    "hasta",
    "citrA",
    "svAtI",
    "vizAkhA",
    "anurAdhA",
    "jyESThA",
    "mUla",
    "pUrvASADhA",
    "uttarASADhA",
    "zravaNa",
    "zraviSThA",
    "zatabhiSak",
    "pUrvaprOSThapadA",
    "uttaraprOSThapadA",
    "rEvatI",
];

/// Forms of gaNapati worshipped on saGkaTahara caturthI, indexed by
/// lunar month; slot 13 is for adhika months.
pub const SANKATAHARA_CHATURTHI_NAMES: [&str; 14] = [
    "",
    "vikaTa",
    "cakrarAja",
    "Ekadanta",
    "kRSNapiGgala",
    "gajAnana",
    "hEramba",
    "vighnarAja",
    "vakratuNDa",
    "gaNAdhipa",
    "lambOdara",
    "dvijapriya",
    "bhAlacandra",
    "vibhuvanapAlaka",
];

/// The 60 samvatsaras, prabhava first.
pub const SAMVATSARA_NAMES: [&str; 60] = [
    "prabhava",
    "vibhava",
    "zukla",
    "pramOda",
    "prajOtpatti",
    "AGgirasa",
    "zrImukha",
    "bhava",
    "yuva",
    "dhAtR",
    "Izvara",
    "bahudhAnya",
    "pramAthin",
    "vikrama",
    "vRSa",
    "citrabhAnu",
    "svabhAnu",
    "tAraNa",
    "pArthiva",
    "vyaya",
    "sarvajit",
    "sarvadhArin",
    "virOdhin",
    "vikRti",
    "khara",
    "nandana",
    "vijaya",
    "jaya",
    "manmatha",
    "durmukha",
    "hEvilambin",
    "vilambin",
    "vikArin",
    "zArvarI",
    "plava",
    "zubhakRt",
    "zObhakRt",
    "krOdhin",
    "vizvAvasu",
    "parAbhava",
    "plavaGga",
    "kIlaka",
    "saumya",
    "sAdhAraNa",
    "virOdhikRt",
    "paridhAvin",
    "pramAdin",
    "Ananda",
    "rAkSasa",
    "nala",
    "piGgala",
    "kAlayukti",
    "siddhArthin",
    "raudra",
    "durmati",
    "dundubhi",
    "rudhirOdgArin",
    "raktAkSa",
    "krOdhana",
    "akSaya",
];

/// Reference epoch: CE 1987 = prabhava.
pub const SAMVATSARA_EPOCH_YEAR: i32 = 1987;

/// Samvatsara beginning at the solar new year of Gregorian `year`.
pub fn samvatsara_name(year: i32) -> &'static str {
    SAMVATSARA_NAMES[(year - SAMVATSARA_EPOCH_YEAR).rem_euclid(60) as usize]
}

const SHUKLA_EKADASHI: [&str; 12] = [
    "kAmadA",
    "mOhinI",
    "nirjalA",
    "zayanI",
    "putradA",
    "parivartinI",
    "pAzAGkuzA",
    "prabOdhinI",
    "mOkSadA",
    "putradA",
    "jayA",
    "AmalakI",
];

const KRISHNA_EKADASHI: [&str; 12] = [
    "varUthinI",
    "aparA",
    "yOginI",
    "kAmikA",
    "ajA",
    "indirA",
    "ramA",
    "utpannA",
    "saphalA",
    "SaTtilA",
    "vijayA",
    "pApamOcanI",
];

/// Paksha of a tithi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    /// Paksha of tithi `1..=30`.
    pub fn of_tithi(tithi: u8) -> Self {
        if tithi > 15 { Self::Krishna } else { Self::Shukla }
    }
}

fn month_slot(month: u8) -> usize {
    usize::from(month.clamp(1, 12) - 1)
}

/// Name of the ekadashi of `paksha` in `month`.
pub fn ekadashi_name(paksha: Paksha, month: LunarMonth) -> String {
    let name = match (month, paksha) {
        (LunarMonth::Adhika(_), Paksha::Shukla) => "padminI",
        (LunarMonth::Adhika(_), Paksha::Krishna) => "paramA",
        (LunarMonth::Nija(m), Paksha::Shukla) => SHUKLA_EKADASHI[month_slot(m)],
        (LunarMonth::Nija(m), Paksha::Krishna) => KRISHNA_EKADASHI[month_slot(m)],
    };
    format!("{name}~EkAdazI")
}

/// Lunar month name; adhika months carry an `adhika-` prefix.
pub fn lunar_month_name(month: LunarMonth) -> String {
    let name = LUNAR_MONTH_NAMES[month_slot(month.number())];
    if month.is_adhika() {
        format!("adhika-{name}")
    } else {
        name.to_string()
    }
}

/// gaNapati form for the saGkaTahara caturthI of `month`.
pub fn sankatahara_ganapati_name(month: LunarMonth) -> &'static str {
    match month {
        LunarMonth::Adhika(_) => SANKATAHARA_CHATURTHI_NAMES[13],
        LunarMonth::Nija(m) => SANKATAHARA_CHATURTHI_NAMES[month_slot(m) + 1],
    }
}

/// Nakshatra name for index `1..=27`.
pub fn nakshatra_name(index: u8) -> &'static str {
    NAKSHATRA_NAMES[usize::from(index.clamp(1, 27) - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samvatsara_epoch_and_wrap() {
        assert_eq!(samvatsara_name(1987), "prabhava");
        assert_eq!(samvatsara_name(2024), "krOdhin");
        assert_eq!(samvatsara_name(2047), "prabhava");
        assert_eq!(samvatsara_name(1986), "akSaya");
    }

    #[test]
    fn ekadashi_names() {
        assert_eq!(
            ekadashi_name(Paksha::Shukla, LunarMonth::Nija(9)),
            "mOkSadA~EkAdazI"
        );
        assert_eq!(
            ekadashi_name(Paksha::Krishna, LunarMonth::Nija(1)),
            "varUthinI~EkAdazI"
        );
        assert_eq!(
            ekadashi_name(Paksha::Krishna, LunarMonth::Adhika(5)),
            "paramA~EkAdazI"
        );
    }

    #[test]
    fn month_and_star_names() {
        assert_eq!(lunar_month_name(LunarMonth::Nija(6)), "bhAdrapada");
        assert_eq!(lunar_month_name(LunarMonth::Adhika(5)), "adhika-zrAvaNa");
        assert_eq!(nakshatra_name(23), "zraviSThA");
        assert_eq!(nakshatra_name(24), "zatabhiSak");
    }

    #[test]
    fn sankatahara_forms() {
        assert_eq!(sankatahara_ganapati_name(LunarMonth::Nija(1)), "vikaTa");
        assert_eq!(sankatahara_ganapati_name(LunarMonth::Nija(12)), "bhAlacandra");
        assert_eq!(
            sankatahara_ganapati_name(LunarMonth::Adhika(4)),
            "vibhuvanapAlaka"
        );
    }

    #[test]
    fn paksha_split() {
        assert_eq!(Paksha::of_tithi(15), Paksha::Shukla);
        assert_eq!(Paksha::of_tithi(16), Paksha::Krishna);
    }
}

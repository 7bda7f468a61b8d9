//! Static geography tables: country name→code, country default language,
//! and state→major city.
//!
//! Built once into the binary and exposed through lookup functions; never
//! mutated at runtime.

/// Country display name to ISO-3166 alpha-2 code. Name matching is exact,
/// case-insensitive.
const COUNTRIES: &[(&str, &str)] = &[
    ("argentina", "ar"),
    ("australia", "au"),
    ("austria", "at"),
    ("bangladesh", "bd"),
    ("belgium", "be"),
    ("brazil", "br"),
    ("canada", "ca"),
    ("chile", "cl"),
    ("china", "cn"),
    ("colombia", "co"),
    ("czech republic", "cz"),
    ("denmark", "dk"),
    ("egypt", "eg"),
    ("finland", "fi"),
    ("france", "fr"),
    ("germany", "de"),
    ("greece", "gr"),
    ("hong kong", "hk"),
    ("hungary", "hu"),
    ("india", "in"),
    ("indonesia", "id"),
    ("ireland", "ie"),
    ("israel", "il"),
    ("italy", "it"),
    ("japan", "jp"),
    ("kenya", "ke"),
    ("malaysia", "my"),
    ("mexico", "mx"),
    ("netherlands", "nl"),
    ("new zealand", "nz"),
    ("nigeria", "ng"),
    ("norway", "no"),
    ("pakistan", "pk"),
    ("peru", "pe"),
    ("philippines", "ph"),
    ("poland", "pl"),
    ("portugal", "pt"),
    ("qatar", "qa"),
    ("romania", "ro"),
    ("russia", "ru"),
    ("saudi arabia", "sa"),
    ("singapore", "sg"),
    ("south africa", "za"),
    ("south korea", "kr"),
    ("spain", "es"),
    ("sweden", "se"),
    ("switzerland", "ch"),
    ("taiwan", "tw"),
    ("thailand", "th"),
    ("turkey", "tr"),
    ("ukraine", "ua"),
    ("united arab emirates", "ae"),
    ("united kingdom", "gb"),
    ("united states", "us"),
    ("united states of america", "us"),
    ("usa", "us"),
    ("uk", "gb"),
    ("uae", "ae"),
    ("vietnam", "vn"),
];

/// Default interface language per country code (ISO-639-1).
const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("ae", "ar"),
    ("ar", "es"),
    ("at", "de"),
    ("au", "en"),
    ("bd", "bn"),
    ("be", "nl"),
    ("br", "pt"),
    ("ca", "en"),
    ("ch", "de"),
    ("cl", "es"),
    ("cn", "zh"),
    ("co", "es"),
    ("cz", "cs"),
    ("de", "de"),
    ("dk", "da"),
    ("eg", "ar"),
    ("es", "es"),
    ("fi", "fi"),
    ("fr", "fr"),
    ("gb", "en"),
    ("gr", "el"),
    ("hk", "zh"),
    ("hu", "hu"),
    ("id", "id"),
    ("ie", "en"),
    ("il", "he"),
    ("in", "hi"),
    ("it", "it"),
    ("jp", "ja"),
    ("ke", "en"),
    ("kr", "ko"),
    ("mx", "es"),
    ("my", "ms"),
    ("ng", "en"),
    ("nl", "nl"),
    ("no", "no"),
    ("nz", "en"),
    ("pe", "es"),
    ("ph", "en"),
    ("pk", "ur"),
    ("pl", "pl"),
    ("pt", "pt"),
    ("qa", "ar"),
    ("ro", "ro"),
    ("ru", "ru"),
    ("sa", "ar"),
    ("se", "sv"),
    ("sg", "en"),
    ("th", "th"),
    ("tr", "tr"),
    ("tw", "zh"),
    ("ua", "uk"),
    ("us", "en"),
    ("vn", "vi"),
    ("za", "en"),
];

/// Well-known major city per state/province, used only to hint the
/// upstream `location` parameter for state-only signatures.
const STATE_MAJOR_CITIES: &[(&str, &str)] = &[
    ("alberta", "Calgary"),
    ("bavaria", "Munich"),
    ("california", "Los Angeles"),
    ("delhi", "New Delhi"),
    ("florida", "Miami"),
    ("georgia", "Atlanta"),
    ("gujarat", "Ahmedabad"),
    ("illinois", "Chicago"),
    ("karnataka", "Bengaluru"),
    ("kerala", "Kochi"),
    ("maharashtra", "Mumbai"),
    ("massachusetts", "Boston"),
    ("new south wales", "Sydney"),
    ("new york", "New York City"),
    ("ontario", "Toronto"),
    ("pennsylvania", "Philadelphia"),
    ("punjab", "Ludhiana"),
    ("quebec", "Montreal"),
    ("queensland", "Brisbane"),
    ("rajasthan", "Jaipur"),
    ("tamil nadu", "Chennai"),
    ("telangana", "Hyderabad"),
    ("texas", "Houston"),
    ("uttar pradesh", "Lucknow"),
    ("victoria", "Melbourne"),
    ("washington", "Seattle"),
    ("west bengal", "Kolkata"),
];

/// Resolve a country display name to its ISO-3166 alpha-2 code.
pub fn country_code_for(name: &str) -> Option<&'static str> {
    let needle = name.trim().to_lowercase();
    COUNTRIES
        .iter()
        .find(|(country, _)| *country == needle)
        .map(|(_, code)| *code)
}

/// Default ISO-639-1 language for a country code.
pub fn default_language_for(country_code: &str) -> Option<&'static str> {
    let needle = country_code.trim().to_lowercase();
    DEFAULT_LANGUAGES
        .iter()
        .find(|(code, _)| *code == needle)
        .map(|(_, lang)| *lang)
}

/// Well-known major city for a state/province name, if one is on file.
pub fn major_city_for_state(state: &str) -> Option<&'static str> {
    let needle = state.trim().to_lowercase();
    STATE_MAJOR_CITIES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, city)| *city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_lookup_is_case_insensitive() {
        assert_eq!(country_code_for("Saudi Arabia"), Some("sa"));
        assert_eq!(country_code_for("UNITED STATES"), Some("us"));
        assert_eq!(country_code_for("  france  "), Some("fr"));
    }

    #[test]
    fn country_lookup_aliases() {
        assert_eq!(country_code_for("USA"), Some("us"));
        assert_eq!(country_code_for("UK"), Some("gb"));
    }

    #[test]
    fn unknown_country_is_none() {
        assert_eq!(country_code_for("atlantis"), None);
        assert_eq!(country_code_for(""), None);
    }

    #[test]
    fn default_language_lookup() {
        assert_eq!(default_language_for("sa"), Some("ar"));
        assert_eq!(default_language_for("JP"), Some("ja"));
        assert_eq!(default_language_for("zz"), None);
    }

    #[test]
    fn major_city_lookup() {
        assert_eq!(major_city_for_state("Texas"), Some("Houston"));
        assert_eq!(major_city_for_state("maharashtra"), Some("Mumbai"));
        assert_eq!(major_city_for_state("narnia"), None);
    }

    #[test]
    fn tables_are_lowercase_keyed() {
        for (name, code) in COUNTRIES {
            assert_eq!(*name, name.to_lowercase());
            assert_eq!(code.len(), 2);
        }
        for (code, lang) in DEFAULT_LANGUAGES {
            assert_eq!(code.len(), 2);
            assert_eq!(lang.len(), 2);
        }
        for (state, _) in STATE_MAJOR_CITIES {
            assert_eq!(*state, state.to_lowercase());
        }
    }
}

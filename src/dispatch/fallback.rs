//! Domain-fallback inference for zero-result site-scoped queries.
//!
//! When a site-scoped source returns nothing, the dispatcher retries once
//! against the brand's global domain: an explicit brand map first, then a
//! heuristic that swaps a country-code TLD suffix for `.com`. The retry
//! drops geo-restriction and picks a language by a fixed precedence chain.

use crate::location::tables;

/// Explicit country-storefront → global-domain pairs. Consulted before the
/// ccTLD heuristic.
const BRAND_COUNTERPARTS: &[(&str, &str)] = &[
    ("amazon.ae", "amazon.com"),
    ("amazon.co.uk", "amazon.com"),
    ("amazon.de", "amazon.com"),
    ("amazon.eg", "amazon.com"),
    ("amazon.in", "amazon.com"),
    ("amazon.sa", "amazon.com"),
    ("ebay.co.uk", "ebay.com"),
    ("ebay.de", "ebay.com"),
    ("google.co.in", "google.com"),
    ("mercadolibre.com.mx", "mercadolibre.com"),
    ("noon.sa", "noon.com"),
    ("souq.sa", "souq.com"),
];

/// Compound country-code suffixes recognised by the heuristic, checked
/// before plain 2-letter TLDs.
const COMPOUND_CC_TLDS: &[&str] = &[
    "co.in", "co.jp", "co.kr", "co.uk", "co.za", "com.au", "com.br", "com.eg", "com.mx", "com.sa",
    "com.sg", "com.tr",
];

/// Infer the global counterpart of a site-scoped domain.
///
/// Brand map first; otherwise replace a recognised ccTLD suffix with
/// `.com`, but only when the inferred domain actually differs from the
/// original. Returns `None` when no counterpart can be inferred.
pub fn global_counterpart(domain: &str) -> Option<String> {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        return None;
    }

    if let Some((_, global)) = BRAND_COUNTERPARTS.iter().find(|(local, _)| *local == domain) {
        return Some((*global).to_string());
    }

    for suffix in COMPOUND_CC_TLDS {
        if let Some(stem) = domain.strip_suffix(&format!(".{suffix}")) {
            return candidate_if_different(stem, &domain);
        }
    }

    let (stem, tld) = domain.rsplit_once('.')?;
    if tld.len() == 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) && !stem.is_empty() {
        return candidate_if_different(stem, &domain);
    }
    None
}

fn candidate_if_different(stem: &str, original: &str) -> Option<String> {
    let candidate = format!("{stem}.com");
    if candidate == original {
        None
    } else {
        Some(candidate)
    }
}

/// Pick the language for a fallback retry: configured filter language,
/// else the geography's default language, else the query's dominant
/// script, else English.
pub fn fallback_language(
    filter_language: Option<&str>,
    country_code: Option<&str>,
    query: &str,
) -> String {
    if let Some(lang) = filter_language.filter(|l| !l.is_empty()) {
        return lang.to_string();
    }
    if let Some(lang) = country_code
        .filter(|c| !c.is_empty())
        .and_then(tables::default_language_for)
    {
        return lang.to_string();
    }
    if let Some(lang) = detect_script_language(query) {
        return lang.to_string();
    }
    "en".to_string()
}

/// Classify the dominant non-Latin script of a text, if any.
///
/// Counts characters per script block and returns the script's language
/// once non-Latin characters outnumber Latin letters.
pub fn detect_script_language(text: &str) -> Option<&'static str> {
    let mut latin = 0usize;
    let mut counts: [(usize, &'static str); 7] = [
        (0, "ar"), // Arabic
        (0, "ru"), // Cyrillic
        (0, "zh"), // CJK ideographs
        (0, "ja"), // Kana
        (0, "ko"), // Hangul
        (0, "th"), // Thai
        (0, "hi"), // Devanagari
    ];

    for c in text.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => latin += 1,
            '\u{0600}'..='\u{06FF}' => counts[0].0 += 1,
            '\u{0400}'..='\u{04FF}' => counts[1].0 += 1,
            '\u{4E00}'..='\u{9FFF}' => counts[2].0 += 1,
            '\u{3040}'..='\u{30FF}' => counts[3].0 += 1,
            '\u{AC00}'..='\u{D7AF}' => counts[4].0 += 1,
            '\u{0E00}'..='\u{0E7F}' => counts[5].0 += 1,
            '\u{0900}'..='\u{097F}' => counts[6].0 += 1,
            _ => {}
        }
    }

    let (count, language) = counts.iter().max_by_key(|(count, _)| *count)?;
    if *count > latin {
        Some(language)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_map_takes_precedence() {
        assert_eq!(global_counterpart("amazon.sa").as_deref(), Some("amazon.com"));
        assert_eq!(
            global_counterpart("amazon.co.uk").as_deref(),
            Some("amazon.com")
        );
        assert_eq!(global_counterpart("noon.sa").as_deref(), Some("noon.com"));
    }

    #[test]
    fn two_letter_cc_tld_swapped_for_com() {
        assert_eq!(global_counterpart("shop.sa").as_deref(), Some("shop.com"));
        assert_eq!(global_counterpart("zalando.de").as_deref(), Some("zalando.com"));
    }

    #[test]
    fn compound_cc_tld_swapped_for_com() {
        assert_eq!(
            global_counterpart("flipkart.co.in").as_deref(),
            Some("flipkart.com")
        );
        assert_eq!(
            global_counterpart("mercadolivre.com.br").as_deref(),
            Some("mercadolivre.com")
        );
    }

    #[test]
    fn com_domain_has_no_counterpart() {
        assert_eq!(global_counterpart("amazon.com"), None);
        assert_eq!(global_counterpart("example.org"), None);
    }

    #[test]
    fn degenerate_domains_have_no_counterpart() {
        assert_eq!(global_counterpart(""), None);
        assert_eq!(global_counterpart("localhost"), None);
        assert_eq!(global_counterpart(".de"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(global_counterpart("Amazon.SA").as_deref(), Some("amazon.com"));
    }

    #[test]
    fn language_prefers_filter_setting() {
        assert_eq!(fallback_language(Some("fr"), Some("sa"), "query"), "fr");
    }

    #[test]
    fn language_falls_back_to_country_default() {
        assert_eq!(fallback_language(None, Some("sa"), "query"), "ar");
        assert_eq!(fallback_language(Some(""), Some("jp"), "query"), "ja");
    }

    #[test]
    fn language_falls_back_to_query_script() {
        assert_eq!(fallback_language(None, None, "بحث عن حذاء"), "ar");
        assert_eq!(fallback_language(None, Some("zz"), "поиск обуви"), "ru");
    }

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(fallback_language(None, None, "plain latin query"), "en");
    }

    #[test]
    fn script_detection_major_blocks() {
        assert_eq!(detect_script_language("مرحبا بالعالم"), Some("ar"));
        assert_eq!(detect_script_language("привет мир"), Some("ru"));
        assert_eq!(detect_script_language("你好世界"), Some("zh"));
        assert_eq!(detect_script_language("こんにちは"), Some("ja"));
        assert_eq!(detect_script_language("안녕하세요"), Some("ko"));
        assert_eq!(detect_script_language("สวัสดี"), Some("th"));
        assert_eq!(detect_script_language("नमस्ते"), Some("hi"));
    }

    #[test]
    fn latin_dominant_text_detects_nothing() {
        assert_eq!(detect_script_language("hello world"), None);
        assert_eq!(detect_script_language("mostly english текст"), None);
        assert_eq!(detect_script_language(""), None);
    }
}

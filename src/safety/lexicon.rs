//! Multilingual keyword sets and the adult-domain blocklist.
//!
//! Two parallel per-language keyword sets drive the content policy:
//! `SAFE_CONTEXT` (educational/medical phrases that always win) and
//! `BLOCKED` (explicit adult-content terms). All languages are applied to
//! every text regardless of the query's own language. The tables are
//! loaded once and injected read-only into the filter.

/// Educational/medical phrases. A match anywhere allows the text outright.
const SAFE_CONTEXT: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "breast cancer",
            "cancer screening",
            "sex education",
            "sexual health",
            "reproductive health",
            "anatomy",
            "pregnancy",
            "menopause",
            "puberty",
            "contraception",
            "std prevention",
            "medical",
            "biology",
            "breastfeeding",
        ],
    ),
    (
        "es",
        &[
            "cancer de mama",
            "educacion sexual",
            "salud sexual",
            "salud reproductiva",
            "anatomia",
            "embarazo",
        ],
    ),
    (
        "fr",
        &[
            "cancer du sein",
            "education sexuelle",
            "sante sexuelle",
            "anatomie",
            "grossesse",
        ],
    ),
    (
        "de",
        &[
            "brustkrebs",
            "sexualkunde",
            "sexuelle gesundheit",
            "anatomie",
            "schwangerschaft",
        ],
    ),
    (
        "ru",
        &["рак груди", "половое воспитание", "анатомия", "беременность"],
    ),
    (
        "ar",
        &["سرطان الثدي", "التربية الجنسية", "الصحة الإنجابية", "تشريح"],
    ),
    ("hi", &["स्तन कैंसर", "यौन शिक्षा", "शरीर रचना", "गर्भावस्था"]),
    ("zh", &["乳腺癌", "性教育", "生殖健康", "解剖学"]),
    ("ja", &["乳がん", "性教育", "解剖学"]),
    ("th", &["มะเร็งเต้านม", "เพศศึกษา", "กายวิภาค"]),
];

/// Explicit adult-content terms. A match blocks unless a safe-context
/// phrase matched first.
const BLOCKED: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "porn",
            "porno",
            "pornography",
            "xxx",
            "xvideos",
            "xnxx",
            "hentai",
            "nude pics",
            "naked girls",
            "sex video",
            "sex videos",
            "erotic",
            "escort service",
            "camgirl",
            "onlyfans leak",
        ],
    ),
    (
        "es",
        &["pornografia", "videos porno", "chicas desnudas", "erotico"],
    ),
    ("fr", &["pornographie", "video porno", "filles nues", "erotique"]),
    ("de", &["pornografie", "pornos", "nackte frauen", "erotik"]),
    ("ru", &["порно", "порнография", "голые девушки", "эротика"]),
    ("ar", &["اباحي", "افلام اباحية", "صور عارية"]),
    ("hi", &["अश्लील", "नंगी तस्वीरें", "सेक्स वीडियो"]),
    ("zh", &["色情", "成人视频", "裸照"]),
    ("ja", &["ポルノ", "アダルト動画", "エロ動画"]),
    ("th", &["หนังโป๊", "คลิปโป๊", "ภาพโป๊"]),
];

/// Known adult-content hostnames. Matching covers the exact host and any
/// subdomain, after stripping a leading `www.`.
const BLOCKED_DOMAINS: &[&str] = &[
    "pornhub.com",
    "xvideos.com",
    "xnxx.com",
    "xhamster.com",
    "redtube.com",
    "youporn.com",
    "spankbang.com",
    "rule34.xxx",
    "chaturbate.com",
    "onlyfans.com",
    "stripchat.com",
    "livejasmin.com",
    "brazzers.com",
    "hqporner.com",
    "eporner.com",
];

/// The immutable keyword sets and domain blocklist the filter runs on.
///
/// Defaults to the built-in multilingual tables; deployments may inject a
/// custom lexicon for testing or policy tuning.
#[derive(Debug, Clone)]
pub struct SafetyLexicon {
    /// (language code, phrases) pairs; all applied to every text.
    pub safe_context: Vec<(String, Vec<String>)>,
    pub blocked: Vec<(String, Vec<String>)>,
    /// Apex domains; subdomains match too.
    pub blocked_domains: Vec<String>,
}

impl Default for SafetyLexicon {
    fn default() -> Self {
        let to_owned = |table: &[(&str, &[&str])]| {
            table
                .iter()
                .map(|(lang, phrases)| {
                    (
                        (*lang).to_string(),
                        phrases.iter().map(|p| (*p).to_string()).collect(),
                    )
                })
                .collect()
        };
        Self {
            safe_context: to_owned(SAFE_CONTEXT),
            blocked: to_owned(BLOCKED),
            blocked_domains: BLOCKED_DOMAINS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

impl SafetyLexicon {
    /// An empty lexicon that blocks nothing. Useful in tests.
    pub fn permissive() -> Self {
        Self {
            safe_context: Vec::new(),
            blocked: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lexicon_is_populated() {
        let lexicon = SafetyLexicon::default();
        assert!(lexicon.safe_context.len() >= 8);
        assert!(lexicon.blocked.len() >= 8);
        assert!(lexicon.blocked_domains.len() >= 10);
    }

    #[test]
    fn keyword_tables_are_lowercase() {
        for (_, phrases) in SAFE_CONTEXT.iter().chain(BLOCKED.iter()) {
            for phrase in *phrases {
                assert_eq!(*phrase, phrase.to_lowercase(), "phrase not lowercase: {phrase}");
            }
        }
    }

    #[test]
    fn blocked_domains_have_no_www_prefix() {
        for domain in BLOCKED_DOMAINS {
            assert!(!domain.starts_with("www."), "apex expected: {domain}");
        }
    }

    #[test]
    fn permissive_lexicon_is_empty() {
        let lexicon = SafetyLexicon::permissive();
        assert!(lexicon.safe_context.is_empty());
        assert!(lexicon.blocked.is_empty());
        assert!(lexicon.blocked_domains.is_empty());
    }
}

//! Canonical team identities for Ligue 1 clubs.
//!
//! Scraped sources spell the same club in many ways ("Paris Saint-Germain", "PSG",
//! "Paris SG", "Olympique de Marseille", "OM", "AS Saint-Étienne"...). Every other
//! module keys teams by the string returned from [`normalize`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasPattern {
    /// The whole (folded) name must equal the alias. Used for short codes like "om"
    /// that would otherwise match inside unrelated names.
    Exact(&'static str),
    /// The folded name must contain the fragment.
    Contains(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct AliasRule {
    pub pattern: AliasPattern,
    pub canonical: &'static str,
}

const fn exact(alias: &'static str, canonical: &'static str) -> AliasRule {
    AliasRule {
        pattern: AliasPattern::Exact(alias),
        canonical,
    }
}

const fn contains(fragment: &'static str, canonical: &'static str) -> AliasRule {
    AliasRule {
        pattern: AliasPattern::Contains(fragment),
        canonical,
    }
}

// Evaluated top to bottom, first match wins. Paris FC has to come before every
// rule that resolves a bare "paris" to PSG.
const ALIAS_RULES: &[AliasRule] = &[
    contains("paris fc", "Paris FC"),
    exact("pfc", "Paris FC"),
    contains("saint-germain", "PSG"),
    contains("saint germain", "PSG"),
    contains("paris sg", "PSG"),
    exact("psg", "PSG"),
    contains("paris", "PSG"),
    contains("marseille", "Marseille"),
    exact("om", "Marseille"),
    contains("lyon", "Lyon"),
    exact("ol", "Lyon"),
    contains("monaco", "Monaco"),
    contains("lille", "Lille"),
    exact("losc", "Lille"),
    contains("nice", "Nice"),
    contains("lens", "Lens"),
    contains("rennes", "Rennes"),
    contains("rennais", "Rennes"),
    contains("brest", "Brest"),
    contains("strasbourg", "Strasbourg"),
    contains("nantes", "Nantes"),
    contains("toulouse", "Toulouse"),
    contains("auxerre", "Auxerre"),
    contains("angers", "Angers"),
    contains("havre", "Le Havre"),
    exact("hac", "Le Havre"),
    contains("lorient", "Lorient"),
    contains("metz", "Metz"),
    contains("etienne", "Saint-Etienne"),
    exact("asse", "Saint-Etienne"),
    contains("montpellier", "Montpellier"),
    contains("reims", "Reims"),
];

pub fn alias_rules() -> &'static [AliasRule] {
    ALIAS_RULES
}

/// Maps a raw team name to its canonical identity.
///
/// Names no rule recognises come back trimmed but otherwise untouched, so unknown
/// clubs still key consistently within one run. The function is idempotent.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let folded = fold_name(trimmed);
    for rule in ALIAS_RULES {
        let hit = match rule.pattern {
            AliasPattern::Exact(alias) => folded == alias,
            AliasPattern::Contains(fragment) => folded.contains(fragment),
        };
        if hit {
            return rule.canonical.to_string();
        }
    }
    trimmed.to_string()
}

pub fn same_team(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

// Lowercase, strip the accents French club names carry and squeeze whitespace.
fn fold_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_space = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        let ch = match ch {
            'à' | 'á' | 'â' | 'ä' | 'ã' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            '\u{2010}' | '\u{2011}' | '\u{2013}' => '-',
            c if c.is_whitespace() => ' ',
            c => c,
        };
        if ch == ' ' {
            if last_space {
                continue;
            }
            last_space = true;
        } else {
            last_space = false;
        }
        out.push(ch);
    }
    out
}

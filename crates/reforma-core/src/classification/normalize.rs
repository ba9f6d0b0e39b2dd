//! Text folding used by the keyword classifiers.
//!
//! Activity descriptions arrive as free text (CNAE descriptions, user
//! input), usually in Portuguese with mixed case and accents. Both the
//! input and the rule keywords go through [`normalize`] before matching.

/// Lower-case, strip diacritics and trim surrounding whitespace.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

/// True when the normalized `keyword` occurs in the already-normalized `haystack`.
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let keyword = normalize(keyword);
    !keyword.is_empty() && haystack.contains(&keyword)
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("  Clínica MÉDICA "), "clinica medica");
        assert_eq!(normalize("Comércio Varejista"), "comercio varejista");
        assert_eq!(normalize("Educação"), "educacao");
        assert_eq!(normalize("AGROPECUÁRIA"), "agropecuaria");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_contains_keyword_normalizes_keyword() {
        assert!(contains_keyword("servicos de saude", "Saúde"));
        assert!(!contains_keyword("comercio", "industria"));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        assert!(!contains_keyword("anything", "  "));
    }
}

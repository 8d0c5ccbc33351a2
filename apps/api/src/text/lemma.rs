//! Light rule-based lemmatizer.
//!
//! Folds the common English inflections (-s, -es, -ies, -ed, -ing and a trailing
//! silent e) onto one normal form so that "manage", "managed", "manages" and
//! "managing" compare equal. The normal form is not always a dictionary word
//! ("manag"); both sides of a comparison go through the same rules, which is all
//! keyword matching needs.

/// Irregular forms checked before the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("led", "lead"),
    ("built", "build"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("taught", "teach"),
    ("made", "make"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("began", "begin"),
    ("begun", "begin"),
    ("won", "win"),
    ("sold", "sell"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("thought", "think"),
    ("children", "child"),
    ("people", "person"),
    ("analyses", "analysis"),
];

const MIN_STEM: usize = 3;

pub fn lemmatize(word: &str) -> String {
    if let Some((_, base)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
        return strip_silent_e(base.to_string());
    }

    if word.len() < 4 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }

    let word = strip_plural(word);
    let word = strip_verbal(&word);
    strip_silent_e(word)
}

fn strip_plural(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    for sibilant in ["ches", "shes", "xes", "zes"] {
        if word.ends_with(sibilant) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if stem.len() >= MIN_STEM => stem.to_string(),
        _ => word.to_string(),
    }
}

fn strip_verbal(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= MIN_STEM {
            return undouble(stem);
        }
        return word.to_string();
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.len() >= MIN_STEM {
            return undouble(stem);
        }
        // "used" -> "use"
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// "runn" -> "run", "plann" -> "plan". Short stems ("add") and l/s/z/f doubles
/// ("install", "pass", "buzz", "staff") are left alone.
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 4 && bytes[n - 1] == bytes[n - 2] && !b"aeioulszf".contains(&bytes[n - 1]) {
        return stem[..n - 1].to_string();
    }
    stem.to_string()
}

fn strip_silent_e(word: String) -> String {
    if word.len() >= 4 && word.ends_with('e') && !word.ends_with("ee") {
        let mut word = word;
        word.pop();
        return word;
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_equal(forms: &[&str]) {
        let first = lemmatize(forms[0]);
        for form in forms {
            assert_eq!(lemmatize(form), first, "{form} did not fold onto {first}");
        }
    }

    #[test]
    fn test_regular_verb_forms_fold() {
        all_equal(&["manage", "managed", "manages", "managing"]);
        all_equal(&["develop", "developed", "develops", "developing"]);
        all_equal(&["test", "tested", "tests", "testing"]);
        all_equal(&["create", "created", "creates", "creating"]);
    }

    #[test]
    fn test_short_stems_keep_their_e() {
        all_equal(&["use", "used", "uses"]);
    }

    #[test]
    fn test_doubled_consonants() {
        assert_eq!(lemmatize("running"), "run");
        assert_eq!(lemmatize("planned"), "plan");
        assert_eq!(lemmatize("shipped"), "ship");
        assert_eq!(lemmatize("installed"), "install");
        assert_eq!(lemmatize("added"), "add");
    }

    #[test]
    fn test_plural_forms() {
        all_equal(&["study", "studies", "studied"]);
        all_equal(&["database", "databases"]);
        all_equal(&["process", "processes", "processed"]);
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("analysis"), "analysis");
    }

    #[test]
    fn test_irregulars() {
        assert_eq!(lemmatize("led"), "lead");
        assert_eq!(lemmatize("built"), lemmatize("build"));
        assert_eq!(lemmatize("analyses"), "analysis");
    }

    #[test]
    fn test_non_alphabetic_untouched() {
        assert_eq!(lemmatize("c++"), "c++");
        assert_eq!(lemmatize("k8s"), "k8s");
        assert_eq!(lemmatize("2024"), "2024");
    }
}

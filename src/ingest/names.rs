//! Competitor name normalization
//!
//! Tab exports spell the same person differently between tournaments
//! (Cyrillic or Latin script, with or without diacritics, with or without a
//! middle name). Every name is reduced to one lowercase ASCII-ish key.

/// Serbian Cyrillic to Latin, lowercase only (input is lowercased first)
fn transliterate(c: char, out: &mut String) {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'ђ' => "đ",
        'е' => "e",
        'ж' => "ž",
        'з' => "z",
        'и' => "i",
        'ј' => "j",
        'к' => "k",
        'л' => "l",
        'љ' => "lj",
        'м' => "m",
        'н' => "n",
        'њ' => "nj",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'ћ' => "ć",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "č",
        'џ' => "dž",
        'ш' => "š",
        _ => {
            out.push(c);
            return;
        }
    };
    out.push_str(latin);
}

fn fold_diacritic(c: char) -> char {
    match c {
        'č' | 'ć' => 'c',
        'š' => 's',
        'ž' => 'z',
        'đ' => 'd',
        other => other,
    }
}

/// Normalize a name as printed on a speaker tab into a rating-table key.
///
/// Lowercases, transliterates Serbian Cyrillic, folds `č ć š ž đ` and keeps
/// only the first and last word of names with three or more words.
///
/// Every middle word is dropped and runs of whitespace collapse, so
/// `Jan van der Berg` and `Jan  Berg` both become `jan berg`. Ratings files
/// written by tools that keep the later middle words (`jan der berg`) will
/// not match these keys and need re-keying.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    let mut latin = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        transliterate(c, &mut latin);
    }
    let folded: String = latin.chars().map(fold_diacritic).collect();

    let words: Vec<&str> = folded.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [first, .., last] if words.len() >= 3 => format!("{} {}", first, last),
        _ => words.join(" "),
    }
}

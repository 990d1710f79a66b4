//! ISO 639-2 to ISO 639-1 language code conversion.
//!
//! makemkvcon reports languages as 3-letter ISO 639-2 codes. Both the
//! terminologic (`deu`) and bibliographic (`ger`) forms are accepted. Codes
//! without a 2-letter equivalent (`und`, `mul`, most collective codes) have
//! no mapping.

/// Converts a 3-letter language code to its 2-letter form.
pub fn to_alpha2(code: &str) -> Option<&'static str> {
    let code = code.trim();
    if code.len() != 3 || !code.is_ascii() {
        return None;
    }

    let lower = code.to_ascii_lowercase();
    let alpha2 = match lower.as_str() {
        "aar" => "aa",
        "abk" => "ab",
        "ave" => "ae",
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "arg" => "an",
        "ara" => "ar",
        "asm" => "as",
        "ava" => "av",
        "aym" => "ay",
        "aze" => "az",
        "bak" => "ba",
        "bel" => "be",
        "bul" => "bg",
        "bih" => "bh",
        "bis" => "bi",
        "bam" => "bm",
        "ben" => "bn",
        "bod" | "tib" => "bo",
        "bre" => "br",
        "bos" => "bs",
        "cat" => "ca",
        "che" => "ce",
        "cha" => "ch",
        "cos" => "co",
        "cre" => "cr",
        "ces" | "cze" => "cs",
        "chu" => "cu",
        "chv" => "cv",
        "cym" | "wel" => "cy",
        "dan" => "da",
        "deu" | "ger" => "de",
        "div" => "dv",
        "dzo" => "dz",
        "ewe" => "ee",
        "ell" | "gre" => "el",
        "eng" => "en",
        "epo" => "eo",
        "spa" => "es",
        "est" => "et",
        "eus" | "baq" => "eu",
        "fas" | "per" => "fa",
        "ful" => "ff",
        "fin" => "fi",
        "fij" => "fj",
        "fao" => "fo",
        "fra" | "fre" => "fr",
        "fry" => "fy",
        "gle" => "ga",
        "gla" => "gd",
        "glg" => "gl",
        "grn" => "gn",
        "guj" => "gu",
        "glv" => "gv",
        "hau" => "ha",
        "heb" => "he",
        "hin" => "hi",
        "hmo" => "ho",
        "hrv" => "hr",
        "hat" => "ht",
        "hun" => "hu",
        "hye" | "arm" => "hy",
        "her" => "hz",
        "ina" => "ia",
        "ind" => "id",
        "ile" => "ie",
        "ibo" => "ig",
        "iii" => "ii",
        "ipk" => "ik",
        "ido" => "io",
        "isl" | "ice" => "is",
        "ita" => "it",
        "iku" => "iu",
        "jpn" => "ja",
        "jav" => "jv",
        "kat" | "geo" => "ka",
        "kon" => "kg",
        "kik" => "ki",
        "kua" => "kj",
        "kaz" => "kk",
        "kal" => "kl",
        "khm" => "km",
        "kan" => "kn",
        "kor" => "ko",
        "kau" => "kr",
        "kas" => "ks",
        "kur" => "ku",
        "kom" => "kv",
        "cor" => "kw",
        "kir" => "ky",
        "lat" => "la",
        "ltz" => "lb",
        "lug" => "lg",
        "lim" => "li",
        "lin" => "ln",
        "lao" => "lo",
        "lit" => "lt",
        "lub" => "lu",
        "lav" => "lv",
        "mlg" => "mg",
        "mah" => "mh",
        "mri" | "mao" => "mi",
        "mkd" | "mac" => "mk",
        "mal" => "ml",
        "mon" => "mn",
        "mar" => "mr",
        "msa" | "may" => "ms",
        "mlt" => "mt",
        "mya" | "bur" => "my",
        "nau" => "na",
        "nob" => "nb",
        "nde" => "nd",
        "nep" => "ne",
        "ndo" => "ng",
        "nld" | "dut" => "nl",
        "nno" => "nn",
        "nor" => "no",
        "nbl" => "nr",
        "nav" => "nv",
        "nya" => "ny",
        "oci" => "oc",
        "oji" => "oj",
        "orm" => "om",
        "ori" => "or",
        "oss" => "os",
        "pan" => "pa",
        "pli" => "pi",
        "pol" => "pl",
        "pus" => "ps",
        "por" => "pt",
        "que" => "qu",
        "roh" => "rm",
        "run" => "rn",
        "ron" | "rum" => "ro",
        "rus" => "ru",
        "kin" => "rw",
        "san" => "sa",
        "srd" => "sc",
        "snd" => "sd",
        "sme" => "se",
        "sag" => "sg",
        "sin" => "si",
        "slk" | "slo" => "sk",
        "slv" => "sl",
        "smo" => "sm",
        "sna" => "sn",
        "som" => "so",
        "sqi" | "alb" => "sq",
        "srp" => "sr",
        "ssw" => "ss",
        "sot" => "st",
        "sun" => "su",
        "swe" => "sv",
        "swa" => "sw",
        "tam" => "ta",
        "tel" => "te",
        "tgk" => "tg",
        "tha" => "th",
        "tir" => "ti",
        "tuk" => "tk",
        "tgl" => "tl",
        "tsn" => "tn",
        "ton" => "to",
        "tur" => "tr",
        "tso" => "ts",
        "tat" => "tt",
        "twi" => "tw",
        "tah" => "ty",
        "uig" => "ug",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "ven" => "ve",
        "vie" => "vi",
        "vol" => "vo",
        "wln" => "wa",
        "wol" => "wo",
        "xho" => "xh",
        "yid" => "yi",
        "yor" => "yo",
        "zha" => "za",
        "zho" | "chi" => "zh",
        "zul" => "zu",
        _ => return None,
    };
    Some(alpha2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminologic_and_bibliographic() {
        assert_eq!(to_alpha2("eng"), Some("en"));
        assert_eq!(to_alpha2("deu"), Some("de"));
        assert_eq!(to_alpha2("ger"), Some("de"));
        assert_eq!(to_alpha2("fre"), Some("fr"));
        assert_eq!(to_alpha2("jpn"), Some("ja"));
        assert_eq!(to_alpha2("chi"), Some("zh"));
    }

    #[test]
    fn case_and_whitespace() {
        assert_eq!(to_alpha2("ENG"), Some("en"));
        assert_eq!(to_alpha2(" spa "), Some("es"));
    }

    #[test]
    fn unmappable() {
        assert_eq!(to_alpha2("und"), None);
        assert_eq!(to_alpha2("mul"), None);
        assert_eq!(to_alpha2("en"), None);
        assert_eq!(to_alpha2(""), None);
        assert_eq!(to_alpha2("English"), None);
    }
}

use chrono::Weekday;

/// Lowercases and strips Spanish accents so "Miércoles" and "miercoles" match
fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Month number (1-12) for a Spanish month name
pub fn parse_month(name: &str) -> Option<u32> {
    let month = match normalize(name).as_str() {
        "enero" => 1,
        "febrero" => 2,
        "marzo" => 3,
        "abril" => 4,
        "mayo" => 5,
        "junio" => 6,
        "julio" => 7,
        "agosto" => 8,
        "septiembre" | "setiembre" => 9,
        "octubre" => 10,
        "noviembre" => 11,
        "diciembre" => 12,
        _ => return None,
    };
    Some(month)
}

/// Weekday for a Spanish day name
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let day = match normalize(name).as_str() {
        "lunes" => Weekday::Mon,
        "martes" => Weekday::Tue,
        "miercoles" => Weekday::Wed,
        "jueves" => Weekday::Thu,
        "viernes" => Weekday::Fri,
        "sabado" => Weekday::Sat,
        "domingo" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// "mARzo" -> "Marzo"
pub fn capitalize(word: &str) -> String {
    let lowered = word.trim().to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("enero"), Some(1));
        assert_eq!(parse_month("Diciembre"), Some(12));
        assert_eq!(parse_month(" SEPTIEMBRE "), Some(9));
        assert_eq!(parse_month("setiembre"), Some(9));
        assert_eq!(parse_month("january"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_parse_weekday_with_and_without_accents() {
        assert_eq!(parse_weekday("miércoles"), Some(Weekday::Wed));
        assert_eq!(parse_weekday("Miercoles"), Some(Weekday::Wed));
        assert_eq!(parse_weekday("SÁBADO"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("domingo"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("sunday"), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mARzo"), "Marzo");
        assert_eq!(capitalize("sábado"), "Sábado");
        assert_eq!(capitalize(""), "");
    }
}

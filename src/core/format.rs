// =============================================================================
// Fichier : format.rs
// Rôle    : Formatage du corps des lignes (espacé, hérité, représentation par défaut)
// =============================================================================

use std::io::Write;

use super::value::Value;

/// Toutes les valeurs séparées par un espace.
pub(crate) fn write_spaced(buf: &mut Vec<u8>, values: &[Value]) {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            buf.push(b' ');
        }
        let _ = write!(buf, "{v}");
    }
}

/// Concaténation héritée : un espace avant chaque valeur, sauf la première et
/// sauf entre deux chaînes consécutives.
pub(crate) fn write_concat(buf: &mut Vec<u8>, values: &[Value]) {
    let mut prev_is_string = false;
    for (i, v) in values.iter().enumerate() {
        let is_string = v.is_string();
        if i > 0 && !(is_string && prev_is_string) {
            buf.push(b' ');
        }
        let _ = write!(buf, "{v}");
        prev_is_string = is_string;
    }
}

/// Représentation par défaut : un espace entre deux opérandes seulement si
/// aucun des deux n'est une chaîne.
pub(crate) fn write_sprint(buf: &mut Vec<u8>, values: &[Value]) {
    let mut prev_is_string = true;
    for v in values {
        let is_string = v.is_string();
        if !is_string && !prev_is_string {
            buf.push(b' ');
        }
        let _ = write!(buf, "{v}");
        prev_is_string = is_string;
    }
}

/// Représentation par défaut sous forme de chaîne (utilisée par les hooks).
pub fn sprint(values: &[Value]) -> String {
    let mut buf = Vec::new();
    write_sprint(&mut buf, values);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Ajoute `\n` si le corps ne se termine pas déjà par un saut de ligne.
pub(crate) fn ensure_newline(buf: &mut Vec<u8>) {
    if buf.last() != Some(&b'\n') {
        buf.push(b'\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn rendered(write: fn(&mut Vec<u8>, &[Value]), values: &[Value]) -> String {
        let mut buf = Vec::new();
        write(&mut buf, values);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn concat_inserts_spaces_around_non_strings() {
        assert_eq!(rendered(write_concat, &values!["[L]", 123, "{L}", "def"]), "[L] 123 {L}def");
        assert_eq!(rendered(write_concat, &values![1, 2]), "1 2");
        assert_eq!(rendered(write_concat, &values!["a", "b", "c"]), "abc");
        assert_eq!(rendered(write_concat, &values![]), "");
    }

    #[test]
    fn sprint_spaces_only_between_non_strings() {
        assert_eq!(sprint(&values!["[L]", 123, "{L}", "def"]), "[L]123{L}def");
        assert_eq!(sprint(&values![1, 2, "a", 3.5, 'c', "b"]), "1 2a3.5 cb");
        assert_eq!(sprint(&values!["a", "b"]), "ab");
        assert_eq!(sprint(&values![]), "");
    }

    #[test]
    fn spaced_always_separates() {
        assert_eq!(rendered(write_spaced, &values!["a", "b", 3]), "a b 3");
    }

    #[test]
    fn newline_added_once() {
        let mut buf = b"x\n".to_vec();
        ensure_newline(&mut buf);
        assert_eq!(buf, b"x\n");
        let mut empty = Vec::new();
        ensure_newline(&mut empty);
        assert_eq!(empty, b"\n");
    }
}

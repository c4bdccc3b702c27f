// =============================================================================
// Fichier : printf.rs
// Rôle    : Substitution `%[drapeaux][largeur][.précision]verbe` façon printf
//
// Les erreurs ne font jamais échouer l'appel : elles sont rendues en ligne
// (`%!d(str=x)`, `%!v(MISSING)`, `%!(EXTRA i64=3)`, `%!(NOVERB)`).
// =============================================================================

use std::io::Write;
use std::iter;

use super::value::Value;

/// Largeur ou précision au-delà de laquelle la directive est rejetée.
const MAX_WIDTH: usize = 1_000_000;

/// Drapeaux, largeur et précision d'une directive.
#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    prec: Option<usize>,
}

// =============================================================================
// Analyse de la chaîne de format
// =============================================================================

/// Substitue `values` dans `format`.
///
/// Verbes : `v s q` (tous), `d x X o O b c U` (entiers et caractères),
/// `x X` aussi sur les chaînes, `t` (booléens), `f F e E g G` (flottants).
pub(crate) fn write_formatted(buf: &mut Vec<u8>, format: &str, values: &[Value]) {
    let bytes = format.as_bytes();
    let end = bytes.len();
    let mut arg = 0;
    let mut i = 0;
    let mut literal_start = 0;

    while i < end {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        buf.extend_from_slice(&bytes[literal_start..i]);
        i += 1;

        let mut spec = Spec::default();
        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => spec.minus = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'0' => spec.zero = true,
                b'#' => spec.sharp = true,
                _ => break,
            }
            i += 1;
        }

        if bytes.get(i) == Some(&b'*') {
            i += 1;
            match star_argument(values, &mut arg) {
                Some(n) => {
                    spec.minus |= n < 0;
                    spec.width = usize::try_from(n.unsigned_abs()).ok();
                }
                None => buf.extend_from_slice(b"%!(BADWIDTH)"),
            }
        } else {
            spec.width = parse_number(bytes, &mut i);
        }

        if bytes.get(i) == Some(&b'.') {
            i += 1;
            if bytes.get(i) == Some(&b'*') {
                i += 1;
                match star_argument(values, &mut arg) {
                    Some(n) => spec.prec = usize::try_from(n).ok(),
                    None => buf.extend_from_slice(b"%!(BADPREC)"),
                }
            } else {
                spec.prec = Some(parse_number(bytes, &mut i).unwrap_or(0));
            }
        }
        if spec.minus {
            spec.zero = false;
        }

        // `i` est toujours sur une frontière de caractère : seuls des
        // octets ASCII ont été consommés depuis le `%`.
        let Some(verb) = format[i..].chars().next() else {
            buf.extend_from_slice(b"%!(NOVERB)");
            literal_start = end;
            break;
        };
        i += verb.len_utf8();
        literal_start = i;

        if verb == '%' {
            buf.push(b'%');
            continue;
        }
        match values.get(arg) {
            Some(value) => {
                arg += 1;
                write_argument(buf, verb, &spec, value);
            }
            None => {
                let _ = write!(buf, "%!{verb}(MISSING)");
            }
        }
    }
    buf.extend_from_slice(&bytes[literal_start..]);

    if arg < values.len() {
        buf.extend_from_slice(b"%!(EXTRA ");
        for (k, v) in values[arg..].iter().enumerate() {
            if k > 0 {
                buf.extend_from_slice(b", ");
            }
            let _ = write!(buf, "{}={v}", v.type_name());
        }
        buf.push(b')');
    }
}

fn parse_number(bytes: &[u8], i: &mut usize) -> Option<usize> {
    let start = *i;
    let mut n: usize = 0;
    while let Some(&d) = bytes.get(*i).filter(|b| b.is_ascii_digit()) {
        n = n.saturating_mul(10).saturating_add(usize::from(d - b'0'));
        *i += 1;
    }
    (*i > start && n <= MAX_WIDTH).then_some(n)
}

/// Largeur ou précision `*` : consomme un argument, qui doit être entier.
fn star_argument(values: &[Value], arg: &mut usize) -> Option<i64> {
    let value = values.get(*arg)?;
    *arg += 1;
    let n = match *value {
        Value::Int(n) => n,
        Value::UInt(n) => i64::try_from(n).ok()?,
        _ => return None,
    };
    (n.unsigned_abs() <= MAX_WIDTH as u64).then_some(n)
}

// =============================================================================
// Rendu d'un argument
// =============================================================================

fn write_argument(buf: &mut Vec<u8>, verb: char, spec: &Spec, value: &Value) {
    let start = buf.len();
    let fits = match value {
        Value::Str(s) => write_string(buf, verb, spec, s),
        Value::Display(d) => write_string(buf, verb, spec, &d.to_string()),
        Value::Bool(b) if matches!(verb, 'v' | 't') => {
            write_text(buf, if *b { "true" } else { "false" }, spec);
            true
        }
        Value::Bool(_) => false,
        Value::Float(x) => write_float(buf, verb, spec, *x),
        Value::Char(c) if matches!(verb, 'v' | 's') => {
            write_text(buf, c.encode_utf8(&mut [0; 4]), spec);
            true
        }
        Value::Char(_) | Value::Int(_) | Value::UInt(_) => write_integer(buf, verb, spec, value),
    };
    if !fits {
        buf.truncate(start);
        let _ = write!(buf, "%!{verb}({}={value})", value.type_name());
    }
}

fn write_string(buf: &mut Vec<u8>, verb: char, spec: &Spec, s: &str) -> bool {
    match verb {
        'v' | 's' => write_text(buf, s, spec),
        'q' => write_quoted(buf, s, spec),
        'x' | 'X' => write_hex_bytes(buf, s.as_bytes(), verb == 'X', spec),
        _ => return false,
    }
    true
}

fn write_integer(buf: &mut Vec<u8>, verb: char, spec: &Spec, value: &Value) -> bool {
    let Some((negative, magnitude)) = value.as_integer() else {
        return false;
    };
    match verb {
        'v' | 'd' | 'x' | 'X' | 'o' | 'O' | 'b' => write_int(buf, verb, spec, negative, magnitude),
        'c' => write_text(buf, to_char(negative, magnitude).encode_utf8(&mut [0; 4]), spec),
        'q' => {
            let start = buf.len();
            let _ = write!(buf, "{:?}", to_char(negative, magnitude));
            pad(buf, start, spec, false, 0);
        }
        'U' => {
            let start = buf.len();
            let code = if negative { magnitude.wrapping_neg() } else { magnitude };
            let _ = write!(buf, "U+{code:04X}");
            let c = to_char(negative, magnitude);
            if spec.sharp && !c.is_control() && c != char::REPLACEMENT_CHARACTER {
                let _ = write!(buf, " '{c}'");
            }
            pad(buf, start, spec, false, 0);
        }
        _ => return false,
    }
    true
}

fn to_char(negative: bool, magnitude: u64) -> char {
    if negative {
        return char::REPLACEMENT_CHARACTER;
    }
    u32::try_from(magnitude)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

// =============================================================================
// Chaînes
// =============================================================================

/// Les `prec` premiers caractères de `s`.
fn truncate_chars(s: &str, prec: Option<usize>) -> &str {
    match prec.and_then(|p| s.char_indices().nth(p)) {
        Some((cut, _)) => &s[..cut],
        None => s,
    }
}

fn write_text(buf: &mut Vec<u8>, s: &str, spec: &Spec) {
    let start = buf.len();
    buf.extend_from_slice(truncate_chars(s, spec.prec).as_bytes());
    pad(buf, start, spec, spec.zero, 0);
}

/// `%q` : forme échappée entre guillemets, ou brute entre backquotes avec `#`.
fn write_quoted(buf: &mut Vec<u8>, s: &str, spec: &Spec) {
    let s = truncate_chars(s, spec.prec);
    let start = buf.len();
    if spec.sharp && !s.contains('`') && !s.chars().any(char::is_control) {
        buf.push(b'`');
        buf.extend_from_slice(s.as_bytes());
        buf.push(b'`');
    } else {
        let _ = write!(buf, "{s:?}");
    }
    pad(buf, start, spec, false, 0);
}

fn write_hex_bytes(buf: &mut Vec<u8>, bytes: &[u8], upper: bool, spec: &Spec) {
    let bytes = &bytes[..spec.prec.map_or(bytes.len(), |p| p.min(bytes.len()))];
    let start = buf.len();
    for (k, b) in bytes.iter().enumerate() {
        // Avec ` `, octets séparés et préfixe `0x` répété.
        if spec.space && k > 0 {
            buf.push(b' ');
        }
        if spec.sharp && (spec.space || k == 0) {
            buf.extend_from_slice(if upper { b"0X" } else { b"0x" });
        }
        let _ = if upper { write!(buf, "{b:02X}") } else { write!(buf, "{b:02x}") };
    }
    pad(buf, start, spec, false, 0);
}

// =============================================================================
// Nombres
// =============================================================================

fn write_sign(buf: &mut Vec<u8>, negative: bool, spec: &Spec) {
    if negative {
        buf.push(b'-');
    } else if spec.plus {
        buf.push(b'+');
    } else if spec.space {
        buf.push(b' ');
    }
}

fn write_int(buf: &mut Vec<u8>, verb: char, spec: &Spec, negative: bool, magnitude: u64) {
    let start = buf.len();
    write_sign(buf, negative, spec);
    let prefix: &[u8] = match verb {
        'x' if spec.sharp => b"0x",
        'X' if spec.sharp => b"0X",
        'o' if spec.sharp && magnitude != 0 => b"0",
        'O' => b"0o",
        'b' if spec.sharp => b"0b",
        _ => b"",
    };
    buf.extend_from_slice(prefix);
    let sign_len = buf.len() - start;

    let digits_start = buf.len();
    // `%.0d` sur zéro n'écrit aucun chiffre.
    if magnitude != 0 || spec.prec != Some(0) {
        let _ = match verb {
            'x' => write!(buf, "{magnitude:x}"),
            'X' => write!(buf, "{magnitude:X}"),
            'o' | 'O' => write!(buf, "{magnitude:o}"),
            'b' => write!(buf, "{magnitude:b}"),
            _ => write!(buf, "{magnitude}"),
        };
    }
    if let Some(prec) = spec.prec {
        let written = buf.len() - digits_start;
        if written < prec {
            buf.splice(digits_start..digits_start, iter::repeat(b'0').take(prec - written));
        }
    }
    pad(buf, start, spec, spec.zero && spec.prec.is_none(), sign_len);
}

fn write_float(buf: &mut Vec<u8>, verb: char, spec: &Spec, x: f64) -> bool {
    if !matches!(verb, 'v' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G') {
        return false;
    }
    if !x.is_finite() {
        let text = if x.is_nan() {
            "NaN"
        } else if x > 0.0 {
            "+Inf"
        } else {
            "-Inf"
        };
        write_text(buf, text, &Spec { zero: false, prec: None, ..*spec });
        return true;
    }

    let start = buf.len();
    write_sign(buf, x.is_sign_negative(), spec);
    let sign_len = buf.len() - start;
    let mark = buf.len();
    let abs = x.abs();
    let upper = verb.is_ascii_uppercase();

    match verb {
        'f' | 'F' => {
            let _ = write!(buf, "{:.*}", spec.prec.unwrap_or(6), abs);
        }
        'e' | 'E' => {
            let _ = write!(buf, "{:.*e}", spec.prec.unwrap_or(6), abs);
            fix_exponent(buf, mark, upper, false);
        }
        _ => write_general(buf, abs, spec.prec, upper, !spec.sharp),
    }
    pad(buf, start, spec, spec.zero, sign_len);
    true
}

/// `%g` : exposant si < -4 ou >= précision (6 pour la forme la plus courte).
fn write_general(buf: &mut Vec<u8>, abs: f64, prec: Option<usize>, upper: bool, trim: bool) {
    let mark = buf.len();
    let digits = prec.map(|p| p.max(1));
    let _ = match digits {
        Some(p) => write!(buf, "{:.*e}", p - 1, abs),
        None => write!(buf, "{abs:e}"),
    };
    let (_, exp) = split_exponent(&buf[mark..]);
    let limit = digits.map_or(6, |p| i32::try_from(p).unwrap_or(i32::MAX));

    if exp < -4 || exp >= limit {
        fix_exponent(buf, mark, upper, trim);
        return;
    }
    buf.truncate(mark);
    match digits {
        Some(_) => {
            let decimals = usize::try_from(limit - 1 - exp).unwrap_or(0);
            let _ = write!(buf, "{:.*}", decimals, abs);
            if trim {
                trim_fraction(buf, mark);
            }
        }
        None => {
            let _ = write!(buf, "{abs}");
        }
    }
}

/// Position du `e` et valeur de l'exposant dans une sortie `{:e}`.
fn split_exponent(digits: &[u8]) -> (usize, i32) {
    let pos = digits.iter().rposition(|&b| b == b'e').unwrap_or(digits.len());
    let exp = digits
        .get(pos + 1..)
        .and_then(|s| std::str::from_utf8(s).ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    (pos, exp)
}

/// Réécrit l'exposant de `{:e}` (`1.5e2`) en `1.5e+02`.
fn fix_exponent(buf: &mut Vec<u8>, mark: usize, upper: bool, trim: bool) {
    let (pos, exp) = split_exponent(&buf[mark..]);
    buf.truncate(mark + pos);
    if trim {
        trim_fraction(buf, mark);
    }
    buf.push(if upper { b'E' } else { b'e' });
    buf.push(if exp < 0 { b'-' } else { b'+' });
    let _ = write!(buf, "{:02}", exp.unsigned_abs());
}

/// Retire les zéros finaux d'une partie décimale, puis le point s'il reste seul.
fn trim_fraction(buf: &mut Vec<u8>, mark: usize) {
    if !buf[mark..].contains(&b'.') {
        return;
    }
    while buf.last() == Some(&b'0') {
        buf.pop();
    }
    if buf.last() == Some(&b'.') {
        buf.pop();
    }
}

// =============================================================================
// Remplissage
// =============================================================================

/// Complète à `width` caractères le texte écrit depuis `start` : espaces à
/// gauche, espaces à droite avec `-`, ou zéros après les `sign_len` premiers
/// octets (signe, préfixe).
fn pad(buf: &mut Vec<u8>, start: usize, spec: &Spec, zero: bool, sign_len: usize) {
    let Some(width) = spec.width else {
        return;
    };
    let written = std::str::from_utf8(&buf[start..])
        .map_or(buf.len() - start, |s| s.chars().count());
    if written >= width {
        return;
    }
    let fill = width - written;
    if spec.minus {
        buf.resize(buf.len() + fill, b' ');
    } else if zero {
        let at = start + sign_len;
        buf.splice(at..at, iter::repeat(b'0').take(fill));
    } else {
        buf.splice(start..start, iter::repeat(b' ').take(fill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn formatted(format: &str, values: &[Value]) -> String {
        let mut buf = Vec::new();
        write_formatted(&mut buf, format, values);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn default_verbs() {
        assert_eq!(formatted("%v, %v", &values!["hello", "world"]), "hello, world");
        assert_eq!(formatted("n=%d ok=%t", &values![5, true]), "n=5 ok=true");
        assert_eq!(formatted("%q", &values!["a b"]), "\"a b\"");
        assert_eq!(formatted("%#q", &values!["a b"]), "`a b`");
        assert_eq!(formatted("%q %d %c", &values!['x', 'A', 66]), "'x' 65 B");
        assert_eq!(formatted("100%%", &values![]), "100%");
        assert_eq!(formatted("héllo %v é", &values!['ü']), "héllo ü é");
        assert_eq!(formatted("%v %v", &values![1.5, 1e6]), "1.5 1e+06");
    }

    #[test]
    fn width_precision_and_padding() {
        assert_eq!(
            formatted("%.2f|%5d|%x|%-4s|", &values![1.5, 42, 255, "ab"]),
            "1.50|   42|ff|ab  |"
        );
        assert_eq!(formatted("%05d|%-5d|%+d|% d", &values![-42, 7, 3, 3]), "-0042|7    |+3| 3");
        assert_eq!(formatted("%08.3f|%8.3f", &values![-1.23456, 2.5]), "-001.235|   2.500");
        assert_eq!(formatted("%.3d|%6.3d", &values![7, -7]), "007|  -007");
        assert_eq!(formatted("%.3s|%5.1s|", &values!["abcdef", "xyz"]), "abc|    x|");
        assert_eq!(formatted("%*d|%-*d|", &values![4, 1, 3, 2]), "   1|2  |");
        assert_eq!(formatted("%3v|", &values!['é']), "  é|");
    }

    #[test]
    fn integer_bases() {
        assert_eq!(formatted("%x %X %#x %#X", &values![255, 255, 255, 255u8]), "ff FF 0xff 0XFF");
        assert_eq!(formatted("%o %#o %O", &values![8, 8, 8]), "10 010 0o10");
        assert_eq!(formatted("%b %#b", &values![5, 5]), "101 0b101");
        assert_eq!(formatted("%#08x", &values![255]), "0x0000ff");
        assert_eq!(formatted("%x", &values![-255]), "-ff");
        assert_eq!(formatted("%U %#U", &values!['A', 0x263A]), "U+0041 U+263A '☺'");
        assert_eq!(formatted("%x % X", &values!["hi", "hi"]), "6869 68 69");
    }

    #[test]
    fn floats() {
        assert_eq!(formatted("%f %.0f %F", &values![1.0, 2.75, 0.125]), "1.000000 3 0.125000");
        assert_eq!(formatted("%e %.2E", &values![1234.5678, 0.000123]), "1.234568e+03 1.23E-04");
        assert_eq!(formatted("%g %g %g", &values![100000.0, 1e-5, 0.0001]), "100000 1e-05 0.0001");
        assert_eq!(formatted("%.3g %.2g %G", &values![1.23456, 100.0, 1e21]), "1.23 1e+02 1E+21");
        assert_eq!(formatted("%#.3g", &values![2.0]), "2.00");
        assert_eq!(formatted("%.2v", &values![1.23456]), "1.2");
        assert_eq!(formatted("%5.1f|%-6.1f|", &values![f64::NAN, f64::INFINITY]), "  NaN|+Inf  |");
        assert_eq!(formatted("%v", &values![f64::NEG_INFINITY]), "-Inf");
    }

    #[test]
    fn mismatched_verbs_show_type_and_value() {
        assert_eq!(formatted("%d", &values!["hi"]), "%!d(str=hi)");
        assert_eq!(formatted("%t", &values![1]), "%!t(i64=1)");
        assert_eq!(formatted("%f", &values![2u8]), "%!f(u64=2)");
        assert_eq!(formatted("%5d|", &values![1.5]), "%!d(f64=1.5)|");
        assert_eq!(formatted("%s", &values![false]), "%!s(bool=false)");
        assert_eq!(formatted("%z", &values!['c']), "%!z(char=c)");
    }

    #[test]
    fn malformed_directives_are_rendered_inline() {
        assert_eq!(formatted("%v %v", &values![1]), "1 %!v(MISSING)");
        assert_eq!(formatted("hello", &values!["world", 3]), "hello%!(EXTRA str=world, i64=3)");
        assert_eq!(formatted("end%", &values![]), "end%!(NOVERB)");
        assert_eq!(formatted("end%-5", &values![]), "end%!(NOVERB)");
        assert_eq!(formatted("%*d", &values!["w", 1]), "%!(BADWIDTH)1");
        assert_eq!(formatted("%.*d", &values![1.5, 1]), "%!(BADPREC)1");
    }
}

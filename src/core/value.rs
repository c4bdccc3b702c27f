// =============================================================================
// Fichier : value.rs
// Rôle    : Valeur opaque transmise au logger (union étiquetée)
// =============================================================================

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

// =============================================================================
// Texte
// =============================================================================

/// Chaîne portée par une [`Value`] : littéral emprunté ou texte partagé.
///
/// Un littéral ne provoque aucune allocation et un clone ne recopie jamais
/// le texte, ce qui garde la fusion des valeurs liées peu coûteuse.
#[derive(Clone)]
pub enum Text {
    Static(&'static str),
    Shared(Arc<str>),
}

impl Text {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Shared(s) => s,
        }
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

// =============================================================================
// Valeur
// =============================================================================

/// Valeur passée à `Logger::print` / `Logger::printf` ou liée via `bind`.
///
/// Le formatage en mode compatibilité doit savoir, à l'exécution, si une
/// valeur est une chaîne : c'est le rôle de [`Value::is_string`].
///
/// Seule la variante `Display` alloue à la construction.
#[derive(Clone)]
pub enum Value {
    Str(Text),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// Toute autre valeur affichable (partagée, donc clonable à bas coût).
    Display(Arc<dyn fmt::Display + Send + Sync>),
}

impl Value {
    /// Enveloppe n'importe quelle valeur affichable.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Display(Arc::new(value))
    }

    /// Vrai uniquement pour la variante `Str`.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Accès à la chaîne si la valeur en est une.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Entier sous forme (négatif, magnitude) ; un caractère donne son code.
    pub fn as_integer(&self) -> Option<(bool, u64)> {
        match *self {
            Self::Int(n) => Some((n < 0, n.unsigned_abs())),
            Self::UInt(n) => Some((false, n)),
            Self::Char(c) => Some((false, u64::from(c))),
            _ => None,
        }
    }

    /// Nom du type, utilisé dans les erreurs de `printf`.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Display(_) => "display",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Display(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Display(d) => write!(f, "{d}"),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Display(a), Self::Display(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Les littéraux sont empruntés ; une chaîne à durée de vie courte passe
/// par `String` (`s.to_owned().into()`).
impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Self::Str(Text::Static(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(Text::Shared(Arc::from(s)))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Str(Text::Shared(Arc::from(s.as_str())))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::Str(Text::Shared(s))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Int(n as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::UInt(n as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

/// Construit un tableau de [`Value`] à partir d'expressions hétérogènes.
///
/// ```
/// let v = rog::values!["id", 42, 1.5, true];
/// assert!(v[0].is_string());
/// ```
#[macro_export]
macro_rules! values {
    () => {{
        let empty: [$crate::Value; 0] = [];
        empty
    }};
    ($($v:expr),+ $(,)?) => {
        [$($crate::Value::from($v)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ness_is_a_runtime_test() {
        let v = crate::values!["a", String::from("b"), 'c', 3, 4u8, 2.5, false];
        let strings: Vec<bool> = v.iter().map(Value::is_string).collect();
        assert_eq!(strings, [true, true, false, false, false, false, false]);
    }

    #[test]
    fn display_matches_default_representation() {
        assert_eq!(Value::from(-12).to_string(), "-12");
        assert_eq!(Value::from(7usize).to_string(), "7");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::display(std::net::Ipv4Addr::LOCALHOST).to_string(), "127.0.0.1");
    }

    #[test]
    fn literals_are_borrowed_and_clones_share_text() {
        const LIT: &str = "literal";
        let v = Value::from(LIT);
        assert!(matches!(&v, Value::Str(Text::Static(s)) if std::ptr::eq(*s, LIT)));

        let owned = Value::from(String::from("owned"));
        let copy = owned.clone();
        match (&owned, &copy) {
            (Value::Str(Text::Shared(a)), Value::Str(Text::Shared(b))) => {
                assert!(Arc::ptr_eq(a, b));
            }
            other => panic!("variante inattendue : {other:?}"),
        }
        assert_eq!(owned.as_str(), Some("owned"));
    }

    #[test]
    fn integers_expose_sign_and_magnitude() {
        assert_eq!(Value::from(-5).as_integer(), Some((true, 5)));
        assert_eq!(Value::from(i64::MIN).as_integer(), Some((true, 1 << 63)));
        assert_eq!(Value::from('A').as_integer(), Some((false, 65)));
        assert_eq!(Value::from("5").as_integer(), None);
    }

    #[test]
    fn debug_quotes_strings_only() {
        assert_eq!(format!("{:?}", Value::from("x y")), "\"x y\"");
        assert_eq!(format!("{:?}", Value::from(5)), "5");
    }
}

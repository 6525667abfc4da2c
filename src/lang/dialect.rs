/// Target machine BASIC. Selects the type tag and version written to the
/// BASC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Apple,
    C64,
    Ams,
}

impl Dialect {
    pub fn from_tag(tag: u8) -> Option<Dialect> {
        match tag {
            0 => Some(Dialect::Apple),
            1 => Some(Dialect::C64),
            2 => Some(Dialect::Ams),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Dialect::Apple => 0,
            Dialect::C64 => 1,
            Dialect::Ams => 2,
        }
    }

    /// Format version, 10 meaning 1.0.
    pub fn version(self) -> u8 {
        match self {
            Dialect::Apple | Dialect::C64 | Dialect::Ams => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Apple => "APPLE",
            Dialect::C64 => "C64",
            Dialect::Ams => "AMS6128",
        }
    }
}

impl Default for Dialect {
    fn default() -> Dialect {
        Dialect::Apple
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "APPLE" => Ok(Dialect::Apple),
            "C64" => Ok(Dialect::C64),
            "AMS" | "AMS6128" => Ok(Dialect::Ams),
            _ => Err(format!("unknown BASIC dialect: {}", s)),
        }
    }
}

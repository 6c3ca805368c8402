use linked_hash_map::LinkedHashMap;
use snafu::{ensure, ResultExt, Snafu};

type Result<T> = ::std::result::Result<T, SchemaError>;

#[derive(Debug, Snafu)]
pub enum SchemaError {
    #[snafu(display("could not read manufacturer table: {}", source))]
    SerdeYamlError { source: serde_yaml::Error },

    #[snafu(display("bad manufacturer key '{}', expected 2 or 6 hex digits", key))]
    BadKey { key: String },
}

lazy_static! {
    /// Built-in manufacturer names.
    pub static ref MANUFACTURERS: ManufacturerNames = load_manufacturers();
}

fn load_manufacturers() -> ManufacturerNames {
    match ManufacturerNames::from_yaml(include_str!("data/manufacturers.yaml")) {
        Ok(names) => names,
        Err(err) => {
            tracing::error!("built-in manufacturer table not loaded: {}", err);
            ManufacturerNames::default()
        }
    }
}

/// Lookup of manufacturer names by identifier key.
///
/// Keys are the identifier bytes as uppercase hex without separators,
/// `"41"` for Roland or `"00206B"` for Arturia.
pub trait NameTable {
    fn lookup(&self, key: &str) -> Option<&str>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManufacturerNames {
    names: LinkedHashMap<String, String>,
}

impl ManufacturerNames {
    pub fn from_yaml(body: &str) -> Result<Self> {
        let raw: LinkedHashMap<String, String> =
            serde_yaml::from_str(body).context(SerdeYamlError)?;
        let mut names = LinkedHashMap::new();
        for (key, name) in raw {
            ensure!(
                (key.len() == 2 || key.len() == 6) && key.chars().all(|c| c.is_ascii_hexdigit()),
                BadKey { key }
            );
            names.insert(key.to_ascii_uppercase(), name);
        }
        Ok(ManufacturerNames { names })
    }

    /// Entries in table order, keys decoded back to identifier bytes.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<u8>, &str)> + '_ {
        self.names.iter().filter_map(|(key, name)| {
            hex::decode(key).ok().map(|id| (id, name.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameTable for ManufacturerNames {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_table() {
        assert!(MANUFACTURERS.len() > 200);
        assert_eq!(MANUFACTURERS.lookup("41"), Some("Roland Corporation"));
        assert_eq!(MANUFACTURERS.lookup("00206B"), Some("Arturia"));
        assert_eq!(MANUFACTURERS.lookup("002004"), Some("Böhm electronic GmbH"));
        assert_eq!(MANUFACTURERS.lookup("45"), None);
        assert_eq!(MANUFACTURERS.lookup("00206b"), None);
    }

    #[test]
    fn keys_are_uppercased() {
        let names = ManufacturerNames::from_yaml("\"00206b\": Arturia\n\"0a\": AKG").unwrap();
        assert_eq!(names.lookup("00206B"), Some("Arturia"));
        assert_eq!(names.lookup("0A"), Some("AKG"));
    }

    #[test]
    fn iter_keeps_order() {
        let names = ManufacturerNames::from_yaml("\"43\": Yamaha\n\"000001\": Time/Warner").unwrap();
        let entries: Vec<(Vec<u8>, &str)> = names.iter().collect();
        assert_eq!(
            entries,
            vec![(vec![0x43], "Yamaha"), (vec![0x00, 0x00, 0x01], "Time/Warner")]
        );
    }

    #[test]
    fn bad_keys() {
        match ManufacturerNames::from_yaml("\"4\": Short") {
            Err(SchemaError::BadKey { key }) => assert_eq!(key, "4"),
            other => panic!("expected bad key, got {:?}", other),
        }
        assert!(ManufacturerNames::from_yaml("\"zz\": Nope").is_err());
        assert!(ManufacturerNames::from_yaml("- not a map").is_err());
    }
}

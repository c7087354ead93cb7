//! Command name registry
//! Alias and unambiguous-prefix matching for colon commands and option
//! names

/// Result of matching a name against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Exact match on a canonical name or explicit alias
    Exact(String),
    /// Unique prefix match
    Prefix(String),
    /// Several commands share the prefix
    Ambiguous { prefix: String, matches: Vec<String> },
    /// Nothing matches
    Unknown(String),
}

/// One registered name with its aliases
#[derive(Debug, Clone)]
pub struct NameDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// Registry over static name definitions
#[derive(Debug, Clone)]
pub struct NameRegistry {
    names: Vec<NameDef>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        NameRegistry { names: Vec::new() }
    }

    #[must_use]
    pub fn register(mut self, name: &'static str, aliases: &'static [&'static str]) -> Self {
        self.names.push(NameDef { name, aliases });
        self
    }

    /// Match an input against the registered names
    ///
    /// Order: exact name, exact alias, then unique prefix of either. A
    /// shared prefix is ambiguous; no match is unknown.
    #[must_use]
    pub fn resolve(&self, input: &str) -> NameMatch {
        let input = input.trim();
        if input.is_empty() {
            return NameMatch::Unknown(String::new());
        }

        for def in &self.names {
            if def.name == input || def.aliases.contains(&input) {
                return NameMatch::Exact(def.name.to_string());
            }
        }

        let mut matches: Vec<String> = Vec::new();
        for def in &self.names {
            let hit = def.name.starts_with(input)
                || def.aliases.iter().any(|a| a.starts_with(input));
            if hit && !matches.iter().any(|m| m == def.name) {
                matches.push(def.name.to_string());
            }
        }

        match matches.len() {
            0 => NameMatch::Unknown(input.to_string()),
            1 => NameMatch::Prefix(matches.remove(0)),
            _ => NameMatch::Ambiguous {
                prefix: input.to_string(),
                matches,
            },
        }
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

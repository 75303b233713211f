use indexmap::IndexSet;

/// Declaration names handed out during one synthesis run, in allocation order.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: IndexSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `candidate`, or the first free `candidate1`, `candidate2`, ...
    pub fn claim(&mut self, candidate: &str) -> String {
        if self.names.insert(candidate.to_string()) {
            return candidate.to_string();
        }
        let mut n: u32 = 1;
        loop {
            let suffixed = format!("{candidate}{n}");
            if self.names.insert(suffixed.clone()) {
                tracing::trace!(candidate, resolved = %suffixed, "name collision");
                return suffixed;
            }
            n += 1;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_keeps_the_candidate() {
        let mut reg = NameRegistry::new();
        assert_eq!(reg.claim("IUser"), "IUser");
        assert!(reg.contains("IUser"));
    }

    #[test]
    fn collisions_count_up_from_one() {
        let mut reg = NameRegistry::new();
        assert_eq!(reg.claim("IUser"), "IUser");
        assert_eq!(reg.claim("IUser"), "IUser1");
        assert_eq!(reg.claim("IUser"), "IUser2");
        assert_eq!(reg.iter().collect::<Vec<_>>(), ["IUser", "IUser1", "IUser2"]);
    }

    #[test]
    fn suffix_search_skips_names_already_taken() {
        let mut reg = NameRegistry::new();
        // a key literally named `user1` lands on the suffixed slot first
        assert_eq!(reg.claim("IUser1"), "IUser1");
        assert_eq!(reg.claim("IUser"), "IUser");
        assert_eq!(reg.claim("IUser"), "IUser2");
        assert_eq!(reg.len(), 3);
    }
}

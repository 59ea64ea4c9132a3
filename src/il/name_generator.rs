use super::Name;

/// Hands out temporaries `t1, t2, ...`, never the same one twice.
#[derive(Debug, Default)]
pub struct NameGenerator {
    index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new unique temporary name.
    pub fn next_temp(&mut self) -> Name {
        self.index += 1;
        Name::Temp(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_temp_generates_ascending_temp_values() {
        let mut name_gen = NameGenerator::new();

        assert_eq!("t1", name_gen.next_temp().to_string());
        assert_eq!("t2", name_gen.next_temp().to_string());
        assert_eq!(Name::Temp(3), name_gen.next_temp());
    }

    #[test]
    fn generators_are_independent() {
        let mut first = NameGenerator::new();
        let mut second = NameGenerator::new();

        first.next_temp();
        first.next_temp();
        assert_eq!("t1", second.next_temp().to_string());
    }
}

use super::Label;

#[derive(Debug, Default)]
pub struct LabelGenerator {
    index: usize,
}
impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new unique label.
    pub fn next_label(&mut self) -> Label {
        self.index += 1;
        Label(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_label_generates_ascending_labels() {
        let mut lbl_gen = LabelGenerator::new();

        assert_eq!("L1", lbl_gen.next_label().to_string());
        assert_eq!("L2", lbl_gen.next_label().to_string());
    }

    #[test]
    fn labels_never_repeat() {
        let mut lbl_gen = LabelGenerator::new();
        let labels: Vec<_> = (0..50).map(|_| lbl_gen.next_label()).collect();

        assert!(labels.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }
}

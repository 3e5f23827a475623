//! Reading and writing the shared form.

use crate::record::{Field, Record};
use crate::view::{Document, RenderTargets};

/// Read the four inputs as a record.
#[must_use]
pub fn read(doc: &Document, targets: &RenderTargets) -> Record {
    Record::from_values(
        targets
            .inputs
            .map(|input| doc.value(input).unwrap_or_default().to_string()),
    )
}

/// Write `record` into the four inputs, positionally.
pub fn fill(doc: &mut Document, targets: &RenderTargets, record: &Record) {
    for (input, value) in targets.inputs.into_iter().zip(record.values()) {
        doc.set_value(input, value);
    }
}

/// Set a single input.
pub fn set_field(doc: &mut Document, targets: &RenderTargets, field: Field, value: &str) {
    doc.set_value(targets.input(field), value);
}

/// Blank all four inputs.
pub fn reset(doc: &mut Document, targets: &RenderTargets) {
    for input in targets.inputs {
        doc.set_value(input, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::mount;

    fn mounted() -> (Document, RenderTargets) {
        let mut doc = Document::new();
        let targets = mount(&mut doc).unwrap();
        (doc, targets)
    }

    #[test]
    fn test_fresh_form_is_empty() {
        let (doc, targets) = mounted();
        assert_eq!(read(&doc, &targets), Record::default());
    }

    #[test]
    fn test_fill_then_read() {
        let (mut doc, targets) = mounted();
        let record = Record::new("A", "B", "2000-01-01", "a@x.com");

        fill(&mut doc, &targets, &record);

        assert_eq!(read(&doc, &targets), record);
        assert_eq!(doc.value(targets.inputs[3]), Some("a@x.com"));
    }

    #[test]
    fn test_set_field() {
        let (mut doc, targets) = mounted();
        set_field(&mut doc, &targets, Field::SecondName, "B");

        let record = read(&doc, &targets);
        assert_eq!(record.second_name, "B");
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_reset() {
        let (mut doc, targets) = mounted();
        fill(&mut doc, &targets, &Record::new("A", "B", "C", "D"));

        reset(&mut doc, &targets);

        assert_eq!(read(&doc, &targets), Record::default());
    }
}

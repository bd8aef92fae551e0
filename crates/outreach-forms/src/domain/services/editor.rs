//! Schema editor engine
//!
//! Session-scoped mutation operations over one form schema, with an
//! active-field pointer tracking the field currently open in the editor.
//! One editor session per form; the persistence layer sees last-write-wins.
//!
//! Index arguments come from the editor's own rendered list, so an
//! out-of-bounds index is a programming error and asserts rather than
//! returning a user-facing error.

use crate::domain::aggregates::FormSchema;
use crate::domain::registry::FieldType;
use crate::domain::value_objects::FieldDefinition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Stateful editor over a form schema.
#[derive(Debug)]
pub struct SchemaEditor {
    schema: FormSchema,
    active_field: Option<usize>,
}

impl SchemaEditor {
    pub fn new(schema: FormSchema) -> Self {
        Self { schema, active_field: None }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Position of the field currently open in the editor, if any.
    pub fn active_field(&self) -> Option<usize> {
        self.active_field
    }

    /// Hand the edited schema back for persistence.
    pub fn into_schema(self) -> FormSchema {
        self.schema
    }

    /// Append a fresh field of the given type with registry defaults and
    /// make it the active field. Never fails.
    pub fn add_field(&mut self, field_type: FieldType) -> &FieldDefinition {
        let mut fields = self.schema.fields().to_vec();
        fields.push(FieldDefinition::new(field_type));
        self.schema.set_fields(fields);
        let index = self.schema.fields().len() - 1;
        self.active_field = Some(index);
        &self.schema.fields()[index]
    }

    /// Replace the field at `index` wholesale, then re-establish the
    /// type-driven invariants (a type change away from select/checkbox/radio
    /// clears the options).
    pub fn update_field(&mut self, index: usize, mut definition: FieldDefinition) {
        let mut fields = self.schema.fields().to_vec();
        assert!(index < fields.len(), "field index {index} out of bounds");
        definition.normalize();
        fields[index] = definition;
        self.schema.set_fields(fields);
    }

    /// Delete the field at `index` and drop the active pointer.
    pub fn remove_field(&mut self, index: usize) {
        let mut fields = self.schema.fields().to_vec();
        assert!(index < fields.len(), "field index {index} out of bounds");
        fields.remove(index);
        self.schema.set_fields(fields);
        self.active_field = None;
    }

    /// Insert a copy of the field at `index` directly after it, under a fresh
    /// id; every other attribute is carried over verbatim. The copy becomes
    /// the active field.
    pub fn duplicate_field(&mut self, index: usize) -> &FieldDefinition {
        let mut fields = self.schema.fields().to_vec();
        assert!(index < fields.len(), "field index {index} out of bounds");
        let copy = fields[index].duplicate();
        fields.insert(index + 1, copy);
        self.schema.set_fields(fields);
        self.active_field = Some(index + 1);
        &self.schema.fields()[index + 1]
    }

    /// Swap the field at `index` with its neighbor. A move past either end
    /// of the list is a true no-op. The active pointer follows the moved
    /// field only when it was pointing at it.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) {
        let len = self.schema.fields().len();
        assert!(index < len, "field index {index} out of bounds");

        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= len {
                    return;
                }
                index + 1
            }
        };

        let mut fields = self.schema.fields().to_vec();
        fields.swap(index, target);
        self.schema.set_fields(fields);

        if self.active_field == Some(index) {
            self.active_field = Some(target);
        }
    }

    /// Drag-and-drop contract: relocate the field identified by `from_id` to
    /// the slot formerly occupied by `to_id`, preserving all other relative
    /// ordering (splice-and-insert, not a swap). Ids are stable across the
    /// gesture, which is why this is keyed by id rather than index. Unknown
    /// ids make this a no-op.
    pub fn reorder(&mut self, from_id: &str, to_id: &str) {
        if from_id == to_id {
            return;
        }
        let fields = self.schema.fields();
        let from = match fields.iter().position(|f| f.id == from_id) {
            Some(i) => i,
            None => return,
        };
        let to = match fields.iter().position(|f| f.id == to_id) {
            Some(i) => i,
            None => return,
        };

        let active_id = self.active_field.and_then(|i| fields.get(i)).map(|f| f.id.clone());

        let mut fields = fields.to_vec();
        let moved = fields.remove(from);
        fields.insert(to, moved);
        self.schema.set_fields(fields);

        if let Some(active_id) = active_id {
            self.active_field = self.schema.fields().iter().position(|f| f.id == active_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::FormType;

    fn editor_with_fields(types: &[FieldType]) -> SchemaEditor {
        let mut editor = SchemaEditor::new(FormSchema::create("Test", FormType::Standard, None));
        for &ft in types {
            editor.add_field(ft);
        }
        editor
    }

    fn ids(editor: &SchemaEditor) -> Vec<String> {
        editor.schema().fields().iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_add_field_sets_active_pointer() {
        let mut editor = editor_with_fields(&[]);
        editor.add_field(FieldType::Text);
        assert_eq!(editor.active_field(), Some(0));
        editor.add_field(FieldType::Header);
        assert_eq!(editor.active_field(), Some(1));
        assert_eq!(editor.schema().fields()[1].label, "Section Header");
    }

    #[test]
    fn test_update_field_clears_options_on_type_change() {
        let mut editor = editor_with_fields(&[FieldType::Select]);
        let mut def = editor.schema().fields()[0].clone();
        def.options = vec!["a".into(), "b".into(), "c".into()];
        editor.update_field(0, def.clone());
        assert_eq!(editor.schema().fields()[0].options.len(), 3);

        def = editor.schema().fields()[0].clone();
        def.field_type = FieldType::Text;
        editor.update_field(0, def);
        assert!(editor.schema().fields()[0].options.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_update_field_out_of_bounds_panics() {
        let mut editor = editor_with_fields(&[FieldType::Text]);
        let def = editor.schema().fields()[0].clone();
        editor.update_field(5, def);
    }

    #[test]
    fn test_remove_field_clears_active_pointer() {
        let mut editor = editor_with_fields(&[FieldType::Text, FieldType::Email]);
        assert!(editor.active_field().is_some());
        editor.remove_field(0);
        assert_eq!(editor.active_field(), None);
        assert_eq!(editor.schema().fields().len(), 1);
    }

    #[test]
    fn test_duplicate_inserts_copy_after_original() {
        let mut editor = editor_with_fields(&[FieldType::Text, FieldType::Email]);
        let original_id = editor.schema().fields()[0].id.clone();
        editor.duplicate_field(0);

        let fields = editor.schema().fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].id, original_id);
        assert_ne!(fields[1].id, original_id);
        assert_eq!(fields[1].field_type, FieldType::Text);
        assert_eq!(fields[1].label, fields[0].label);
        assert_eq!(editor.active_field(), Some(1));
    }

    #[test]
    fn test_move_field_boundary_is_noop() {
        let mut editor = editor_with_fields(&[FieldType::Text, FieldType::Email]);
        let before = ids(&editor);
        editor.move_field(0, MoveDirection::Up);
        assert_eq!(ids(&editor), before);
        editor.move_field(1, MoveDirection::Down);
        assert_eq!(ids(&editor), before);
    }

    #[test]
    fn test_move_field_swaps_and_tracks_active() {
        let mut editor = editor_with_fields(&[FieldType::Text, FieldType::Email, FieldType::Date]);
        let before = ids(&editor);
        // active points at index 2 (last added)
        editor.move_field(2, MoveDirection::Up);
        assert_eq!(ids(&editor), vec![before[0].clone(), before[2].clone(), before[1].clone()]);
        assert_eq!(editor.active_field(), Some(1));

        // moving a field the pointer is not on leaves the pointer alone
        editor.move_field(0, MoveDirection::Down);
        assert_eq!(editor.active_field(), Some(1));
    }

    #[test]
    fn test_reorder_is_splice_not_swap() {
        let mut editor =
            editor_with_fields(&[FieldType::Text, FieldType::Email, FieldType::Date, FieldType::Number]);
        let before = ids(&editor);

        // drag field 0 onto field 2: [a b c d] -> [b c a d]
        editor.reorder(&before[0], &before[2]);
        assert_eq!(
            ids(&editor),
            vec![before[1].clone(), before[2].clone(), before[0].clone(), before[3].clone()]
        );
    }

    #[test]
    fn test_reorder_preserves_ids() {
        let mut editor =
            editor_with_fields(&[FieldType::Text, FieldType::Email, FieldType::Date, FieldType::Number]);
        let mut expected: Vec<String> = ids(&editor);
        expected.sort();

        let before = ids(&editor);
        editor.reorder(&before[3], &before[0]);
        editor.move_field(2, MoveDirection::Down);
        editor.reorder(&before[1], &before[2]);
        editor.move_field(1, MoveDirection::Up);

        let mut after = ids(&editor);
        after.sort();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_reorder_unknown_id_is_noop() {
        let mut editor = editor_with_fields(&[FieldType::Text, FieldType::Email]);
        let before = ids(&editor);
        editor.reorder("nope", &before[0]);
        editor.reorder(&before[0], "nope");
        assert_eq!(ids(&editor), before);
    }
}

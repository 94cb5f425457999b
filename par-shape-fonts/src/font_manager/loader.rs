//! Font lookup and loading against a `fontdb` database.

use fontdb::{Database, Family, Query};

use super::types::FontData;

/// Find a face for a family name without loading its data.
///
/// # Returns
/// `Some(id)` if the database has a regular-weight face for the family.
pub fn query_family(db: &Database, family_name: &str) -> Option<fontdb::ID> {
    let query = Query {
        families: &[Family::Name(family_name)],
        weight: fontdb::Weight::NORMAL,
        style: fontdb::Style::Normal,
        ..Query::default()
    };
    db.query(&query)
}

/// Load the bytes of a face from the database.
///
/// The face index is carried along for TrueType Collection (.ttc) files where
/// multiple faces share the same data.
pub fn load_face(db: &Database, id: fontdb::ID) -> Option<FontData> {
    db.with_face_data(id, |data, face_index| {
        FontData::new_with_index(data.to_vec(), face_index)
    })
    .flatten()
}

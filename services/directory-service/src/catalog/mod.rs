// Built-in data served when the database has nothing to offer
pub mod documents;
pub mod lawyers;

pub use documents::{
    document_details, document_fields, render_document, template_previews, title_for, RenderInput,
};
pub use lawyers::{builtin_lawyers, find_builtin_lawyer, LAWYERS};

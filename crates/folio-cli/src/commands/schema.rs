use folio_core::entities::{
    BlogPost, BlogPostPayload, ContactMessage, ContactPayload, Publication, PublicationPayload,
    ResearchProject, ResearchProjectPayload,
};
use folio_core::identity::AdminIdentity;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaEntity};
use crate::output::output;

/// Handle `folio schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.entity), flags.format)
}

fn schema(entity: SchemaEntity) -> Schema {
    match entity {
        SchemaEntity::Blog => schema_for!(BlogPost),
        SchemaEntity::BlogPayload => schema_for!(BlogPostPayload),
        SchemaEntity::Research => schema_for!(ResearchProject),
        SchemaEntity::ResearchPayload => schema_for!(ResearchProjectPayload),
        SchemaEntity::Publication => schema_for!(Publication),
        SchemaEntity::PublicationPayload => schema_for!(PublicationPayload),
        SchemaEntity::Contact => schema_for!(ContactMessage),
        SchemaEntity::ContactPayload => schema_for!(ContactPayload),
        SchemaEntity::Identity => schema_for!(AdminIdentity),
    }
}

//! Predicate and class names of the manufacturing ontology
//!
//! The store is addressed purely through identities and these named
//! relations; the query dialect itself lives behind the row source and
//! statement executor collaborators.

pub const TYPE: &str = "rdf:type";
pub const LABEL: &str = "rdfs:label";
pub const DESCRIPTION: &str = "dcterms:description";
pub const SOURCE_ID: &str = "mfg:sourceId";

pub const HAS_FACTORY: &str = "mfg:hasFactory";
pub const HAS_SUPPLIER: &str = "mfg:hasSupplier";
pub const OWNED_BY: &str = "mfg:ownedBy";
pub const PROVIDES_PROCESS: &str = "mfg:providesProcess";
pub const REQUIRES_CAPABILITY: &str = "mfg:requiresCapability";
pub const OUTPUTS_PRODUCT: &str = "mfg:outputsProduct";
pub const HAS_CHILD_CAPABILITY: &str = "mfg:hasChildCapability";
pub const GENERALIZED_BY: &str = "mfg:generalizedBy";
pub const HAS_PASSPORT: &str = "mfg:hasPassport";
pub const HAS_PROPERTY: &str = "mfg:hasProperty";
pub const SEMANTIC_REFERENCE: &str = "mfg:semanticReference";
pub const VALUE: &str = "mfg:value";
pub const UNIT: &str = "mfg:unit";

/// Class names, used in type triples and to scope row projections
pub mod classes {
    pub const ENTERPRISE: &str = "mfg:Enterprise";
    pub const FACTORY: &str = "mfg:Factory";
    pub const PROCESS: &str = "mfg:Process";
    pub const CAPABILITY: &str = "mfg:Capability";
    pub const PRODUCT: &str = "mfg:Product";
    pub const PRODUCT_PASSPORT: &str = "mfg:ProductPassport";
    pub const PASSPORT_PROPERTY: &str = "mfg:PassportProperty";
}

//! Write-path integration tests: one plan, paired template and bindings

use fabrik_core::domain::graph::{IdentityMinter, Iri, LangText, mint_fresh_identity, shared};
use fabrik_core::domain::manufacturing::{Enterprise, Factory, PassportProperty, Product, ProductPassport};
use fabrik_core::domain::statement::{
    Bindings, BoundValue, GraphWriter, StatementExecutor, Term, WriteTemplate,
};
use fabrik_core::infrastructure::memory::MemoryStore;
use fabrik_core::{Error, Result};

/// Executor that captures every statement instead of applying it
#[derive(Default)]
struct RecordingExecutor {
    statements: Vec<(WriteTemplate, Bindings)>,
}

impl StatementExecutor for RecordingExecutor {
    fn execute(&mut self, template: &WriteTemplate, bindings: &Bindings) -> Result<()> {
        self.statements.push((template.clone(), bindings.clone()));
        Ok(())
    }
}

#[test]
fn statement_arity_follows_the_collections() {
    let mut enterprise = Enterprise::new(Iri::new("urn:e1"))
        .with_label("Acme", "en")
        .with_source_id("ERP-17");
    for i in 1..=3 {
        enterprise
            .factories
            .push(shared(Factory::new(Iri::new(format!("urn:f{i}")))));
    }

    let mut writer = GraphWriter::new(RecordingExecutor::default());
    writer.write(&enterprise.write_plan().unwrap()).unwrap();

    let (template, bindings) = &writer.executor().statements[0];
    let params: Vec<&str> = template.params().collect();
    assert_eq!(
        params,
        vec![
            "label",
            "description",
            "sourceId",
            "factory",
            "factory1",
            "factory2",
            "supplier",
        ]
    );

    for (i, name) in ["factory", "factory1", "factory2"].iter().enumerate() {
        assert_eq!(
            bindings.get(name),
            Some(&BoundValue::Iri(Iri::new(format!("urn:f{}", i + 1))))
        );
    }
    // Empty supplier collection: its fixed parameter is present but absent.
    assert_eq!(bindings.get("supplier"), Some(&BoundValue::Absent));
    // label + sourceId + three factories + the absent supplier
    assert_eq!(bindings.len(), 6);
}

#[test]
fn zero_arity_series_triple_is_optional_and_populated_ones_are_not() {
    let mut enterprise = Enterprise::new(Iri::new("urn:e1"));
    enterprise
        .factories
        .push(shared(Factory::new(Iri::new("urn:f1"))));

    let mut writer = GraphWriter::new(RecordingExecutor::default());
    writer.write(&enterprise.write_plan().unwrap()).unwrap();

    let (template, _) = &writer.executor().statements[0];
    for triple in &template.triples {
        match &triple.object {
            Term::Param(name) if name == "factory" => assert!(!triple.optional),
            Term::Param(name) if name == "supplier" => assert!(triple.optional),
            _ => {}
        }
    }
}

#[test]
fn bound_parameters_appear_in_template_order() {
    let passport = ProductPassport::new(Iri::new("urn:pp1"))
        .with_property(shared(
            PassportProperty::new(Iri::new("urn:prop1"))
                .with_label("Weight", "en")
                .with_description("Net weight", "en")
                .with_value("12.5")
                .with_unit("kg"),
        ))
        .with_property(shared(
            PassportProperty::new(Iri::new("urn:prop2"))
                .with_semantic_reference("urn:eclass:0173-1#02-AAO677"),
        ));
    let product = Product::new(Iri::new("urn:prod1"))
        .with_label("Gearbox", "en")
        .with_passport(shared(passport));

    let mut writer = GraphWriter::new(RecordingExecutor::default());
    writer.write(&product.write_plan().unwrap()).unwrap();

    let (template, bindings) = &writer.executor().statements[0];
    let params: Vec<&str> = template.params().collect();

    // Both halves walk the same plan: the bound names must be a subsequence
    // of the template's parameter order, and each must exist exactly once.
    let mut cursor = params.iter();
    for (name, _) in bindings.iter() {
        assert!(
            cursor.any(|p| *p == name),
            "binding '{name}' out of order or missing from the template"
        );
    }
    assert_eq!(
        bindings.get("property1SemanticReference"),
        Some(&BoundValue::Iri(Iri::new("urn:eclass:0173-1#02-AAO677")))
    );
}

#[test]
fn untagged_text_is_omitted_but_its_triple_stays_optional() {
    let mut product = Product::new(Iri::new("urn:prod1"));
    product.label = Some(LangText::untagged("Press"));

    let mut writer = GraphWriter::new(RecordingExecutor::default());
    writer.write(&product.write_plan().unwrap()).unwrap();

    let (template, bindings) = &writer.executor().statements[0];
    assert!(bindings.get("label").is_none());
    let label_triple = template
        .triples
        .iter()
        .find(|t| t.object == Term::Param("label".into()))
        .unwrap();
    assert!(label_triple.optional);

    // With the tag present the pair is bound together.
    let product = Product::new(Iri::new("urn:prod2")).with_label("Press", "en");
    writer.write(&product.write_plan().unwrap()).unwrap();
    let (_, bindings) = &writer.executor().statements[1];
    assert_eq!(
        bindings.get("label"),
        Some(&BoundValue::Tagged {
            text: "Press".into(),
            lang: "en".into(),
        })
    );
}

#[test]
fn invalid_nested_property_aborts_before_execution() {
    // Neither semantic reference nor label + description.
    let passport = ProductPassport::new(Iri::new("urn:pp1"))
        .with_property(shared(PassportProperty::new(Iri::new("urn:prop1")).with_value("42")));
    let product = Product::new(Iri::new("urn:prod1")).with_passport(shared(passport));

    let err = product.write_plan().unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            kind: "passport property",
            ..
        }
    ));
}

struct SequenceMinter {
    queue: Vec<&'static str>,
}

impl IdentityMinter for SequenceMinter {
    fn new_identity(&mut self) -> Result<Iri> {
        Ok(Iri::new(self.queue.remove(0)))
    }
}

#[test]
fn minting_retries_until_the_identity_is_unknown_to_storage() {
    let store = MemoryStore::new();
    let taken = Iri::new("urn:taken");
    store.insert_literal(&taken, "rdfs:label", "occupied", None);

    let mut minter = SequenceMinter {
        queue: vec!["urn:taken", "urn:free"],
    };
    let fresh = mint_fresh_identity(&mut minter, &store).unwrap();
    assert_eq!(fresh, Iri::new("urn:free"));
    assert!(!store.contains(&fresh));
}

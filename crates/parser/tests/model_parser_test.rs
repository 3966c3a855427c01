//! Integration tests for model parsing over a fixture service

use sdk_bindgen_common::{BindgenError, ModelKind, ParsedModel, SdkLayout};
use sdk_bindgen_parser::{parse_service, ModelParser, ModelSummary};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const INSTANCE_TS: &str = r#"/**
 * Core Services API
 * OpenAPI spec version: 20160918
 */

import * as model from "../model";
import common = require("oci-common");

/**
 * A compute host.
 */
export interface Instance {
  /**
   * A user-friendly name. Does not have to be unique.
   * @example My instance
   */
  "displayName": string;
  /**
   * The name of the fault domain the instance is running in.
   */
  "faultDomain"?: string;
  "lifecycleState": Instance.LifecycleState;
  "shapeConfig"?: model.InstanceShapeConfig;
  "type"?: string;
}

export namespace Instance {
  export enum LifecycleState {
    Running = "RUNNING",
    Stopped = "STOPPED"
  }

  export function getJsonObj(obj: Instance): object {
    const jsonObj = {
      ...obj,
      ...{
        "shapeConfig": obj.shapeConfig
          ? model.InstanceShapeConfig.getJsonObj(obj.shapeConfig)
          : undefined
      }
    };

    return jsonObj;
  }
}
"#;

const SOURCE_DETAILS_TS: &str = r#"
import * as model from "../model";
import common = require("oci-common");

export interface InstanceSourceDetails {
  "sourceType": string;
}

export namespace InstanceSourceDetails {
  export function getJsonObj(obj: InstanceSourceDetails): object {
    const jsonObj = { ...obj, ...{} };

    if (obj && "sourceType" in obj && obj.sourceType) {
      switch (obj.sourceType) {
        case "image":
          return model.InstanceSourceViaImageDetails.getJsonObj(
            <model.InstanceSourceViaImageDetails>(<object>jsonObj),
            true
          );
        default:
          if (common.LOG.logger) common.LOG.logger.info(`Unknown value for: ${obj.sourceType}`);
      }
    }
    return jsonObj;
  }
}
"#;

const VIA_IMAGE_TS: &str = r#"
import * as model from "../model";

export interface InstanceSourceViaImageDetails extends model.InstanceSourceDetails {
  "imageId": string;
  "sourceType": string;
}

export namespace InstanceSourceViaImageDetails {
  export const sourceType = "image";
  export function getJsonObj(obj: InstanceSourceViaImageDetails, isParentJsonObj?: boolean): object {
    const jsonObj = {
      ...(isParentJsonObj ? obj : (model.InstanceSourceDetails.getJsonObj(obj) as InstanceSourceViaImageDetails)),
      ...{}
    };
    return jsonObj;
  }
}
"#;

/// A `core` service with a plain structure, a nested enum and a variant family
fn fixture_sdk() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "lib/core/index.ts", "export import ComputeClient = client.ComputeClient;\n");
    write(
        root,
        "lib/core/lib/model/index.ts",
        "export import Instance = instance.Instance;\n",
    );
    write(
        root,
        "lib/core/lib/model/attachment.ts",
        "export interface Attachment {\n  \"instanceState\"?: Instance.LifecycleState;\n  \"history\": Array<Instance.LifecycleState>;\n}\n",
    );
    write(root, "lib/core/lib/model/instance.ts", INSTANCE_TS);
    write(
        root,
        "lib/core/lib/model/instance-source-details.ts",
        SOURCE_DETAILS_TS,
    );
    write(
        root,
        "lib/core/lib/model/instance-source-via-image-details.ts",
        VIA_IMAGE_TS,
    );
    write(
        root,
        "lib/core/lib/model/name-pair.ts",
        "export interface NamePair {\n  \"first\": string;\n  \"last\": string;\n}\n",
    );
    write(root, "lib/core/lib/model/NOTES.md", "not a declaration");

    tmp
}

fn find<'a>(models: &'a [ParsedModel], name: &str) -> &'a ParsedModel {
    models
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("model {name} not found"))
}

#[test]
fn test_output_order() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();

    let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Attachment",
            "InstanceSourceDetails",
            "InstanceSourceViaImageDetails",
            "Instance",
            "NamePair",
            "InstanceLifecycleState",
        ]
    );
}

#[test]
fn test_instance_structure() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();
    let instance = find(&models, "Instance");

    assert_eq!(instance.kind(), ModelKind::Structure);
    assert_eq!(instance.file_name, "instance");
    assert_eq!(instance.documentation, "A compute host.");

    let fields = instance.fields();
    assert_eq!(fields.len(), 5);

    assert_eq!(fields[0].name, "displayName");
    assert_eq!(fields[0].target_name, "display_name");
    assert_eq!(fields[0].type_descriptor, "string");
    assert!(fields[0].is_required);
    assert_eq!(
        fields[0].documentation,
        "A user-friendly name. Does not have to be unique."
    );

    assert_eq!(fields[1].name, "faultDomain");
    assert_eq!(fields[1].target_name, "fault_domain");
    assert!(!fields[1].is_required);

    assert_eq!(fields[3].type_descriptor, "InstanceShapeConfig");
    assert_eq!(instance.base_type(), None);
    assert_eq!(instance.discriminator(), None);
}

#[test]
fn test_reserved_word_field_is_escaped() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();
    let instance = find(&models, "Instance");

    let field = instance.fields().iter().find(|f| f.name == "type").unwrap();
    assert_eq!(field.target_name, "r#type");
    assert!(!field.is_required);

    for model in &models {
        for field in model.fields() {
            if field.name != "type" {
                assert!(!field.target_name.starts_with("r#"), "{}", field.target_name);
            }
        }
    }
}

#[test]
fn test_namespace_enum_flattened_and_references_rewritten() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();

    let state = find(&models, "InstanceLifecycleState");
    assert_eq!(state.kind(), ModelKind::Enumeration);
    assert_eq!(state.file_name, "instance_lifecycle_state");
    let variants: Vec<_> = state
        .variants()
        .iter()
        .map(|v| (v.name.as_str(), v.value.as_str()))
        .collect();
    assert_eq!(variants, vec![("Running", "RUNNING"), ("Stopped", "STOPPED")]);

    let instance = find(&models, "Instance");
    assert_eq!(instance.fields()[2].type_descriptor, "InstanceLifecycleState");

    // Referenced from a file scanned before the namespace was seen
    let attachment = find(&models, "Attachment");
    assert_eq!(attachment.fields()[0].type_descriptor, "InstanceLifecycleState");
    assert_eq!(attachment.fields()[1].type_descriptor, "Array<InstanceLifecycleState>");

    for model in &models {
        for field in model.fields() {
            assert!(
                !field.type_descriptor.contains("Instance.LifecycleState"),
                "{} still references the dotted name",
                model.name
            );
        }
    }

    let flattened = models
        .iter()
        .filter(|m| m.name == "InstanceLifecycleState")
        .count();
    assert_eq!(flattened, 1);
}

#[test]
fn test_polymorphic_family() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();

    let base = find(&models, "InstanceSourceDetails");
    assert_eq!(base.discriminator(), Some("sourceType"));
    assert_eq!(base.base_type(), None);

    let variant = find(&models, "InstanceSourceViaImageDetails");
    assert_eq!(variant.base_type(), Some("InstanceSourceDetails"));
    assert_eq!(variant.discriminator(), None);

    for model in &models {
        assert!(
            !(model.base_type().is_some() && model.discriminator().is_some()),
            "{} has both a base type and a discriminator",
            model.name
        );
    }
}

#[test]
fn test_two_string_fields_get_no_discriminator() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();

    let pair = find(&models, "NamePair");
    assert_eq!(pair.fields().len(), 2);
    assert_eq!(pair.discriminator(), None);
}

#[test]
fn test_json_shape() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&sdk_bindgen_common::to_pretty_json(&models).unwrap()).unwrap();

    let instance = &json[3];
    assert_eq!(instance["name"], "Instance");
    assert_eq!(instance["fileName"], "instance");
    assert_eq!(instance["kind"], "structure");
    assert_eq!(instance["fields"][1]["targetName"], "fault_domain");
    assert_eq!(instance["fields"][1]["isRequired"], false);
    assert!(instance.get("baseType").is_none());
    assert!(instance.get("discriminator").is_none());

    let state = &json[5];
    assert_eq!(state["kind"], "enumeration");
    assert_eq!(state["variants"][0]["value"], "RUNNING");
}

#[test]
fn test_deterministic_output() {
    let sdk = fixture_sdk();
    let first = parse_service(sdk.path(), "core").unwrap();
    let second = parse_service(sdk.path(), "core").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_summary() {
    let sdk = fixture_sdk();
    let models = parse_service(sdk.path(), "core").unwrap();
    let summary = ModelSummary::from_models(&models);

    assert_eq!(summary.structures, 5);
    assert_eq!(summary.enumerations, 1);
    assert_eq!(summary.type_aliases, 0);
    assert_eq!(summary.polymorphic_bases, 1);
    assert_eq!(summary.polymorphic_variants, 1);
}

#[test]
fn test_missing_model_directory_is_fatal() {
    let sdk = fixture_sdk();
    let err = parse_service(sdk.path(), "nosuchservice").unwrap_err();
    assert!(matches!(err, BindgenError::ModelDirectoryNotFound { .. }));
    assert!(err.to_string().contains("nosuchservice"));
}

#[test]
fn test_syntax_error_names_file() {
    let sdk = fixture_sdk();
    write(
        sdk.path(),
        "lib/core/lib/model/zz-broken.ts",
        "export interface Broken {\n  \"a\": string;\n  \"b\": (number;\n}\n",
    );

    let err = parse_service(sdk.path(), "core").unwrap_err();
    match &err {
        BindgenError::Syntax { path, .. } => {
            assert!(path.ends_with("zz-broken.ts"), "{}", path.display());
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("zz-broken.ts"));
}

#[test]
fn test_custom_layout() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "services/storage/models/bucket.mts",
        "import * as models from \"./index\";\nexport interface Bucket {\n  \"owner\": models.Owner;\n  \"size\": number;\n}\n",
    );
    write(tmp.path(), "services/storage/models/mod.mts", "");

    let layout = SdkLayout::from_yaml(
        "services_dir: services\nstructures_dir: models\nsource_extension: mts\nbarrel_file: mod.mts\ncontainer_qualifiers: []\n",
    )
    .unwrap();

    let models = ModelParser::new(tmp.path(), "storage")
        .with_layout(layout)
        .parse()
        .unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "Bucket");
    // Relative namespace-import aliases are stripped even without configured qualifiers
    assert_eq!(models[0].fields()[0].type_descriptor, "Owner");
}

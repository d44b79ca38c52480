// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing of `kustomize build` output

use crate::domain::source::Image;
use crate::infrastructure::constants::{CONTAINER_KEYS, IMAGE_KEY};
use crate::shared::error::{KustomizeError, Result};
use kube::core::DynamicObject;
use kube::ResourceExt;
use serde::Deserialize;
use serde_json::Value;

/// Objects produced by a build, in output order, and the container images
/// they reference
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub objects: Vec<DynamicObject>,
    pub images: Vec<Image>,
}

impl BuildOutput {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a DynamicObject> + 'a {
        self.objects.iter().filter(move |o| kind_of(o) == kind)
    }

    pub fn find(&self, kind: &str, name: &str) -> Option<&DynamicObject> {
        self.objects
            .iter()
            .find(|o| kind_of(o) == kind && o.name_any() == name)
    }
}

/// Kind of a manifest object, empty when the document has none
pub fn kind_of(object: &DynamicObject) -> &str {
    object
        .types
        .as_ref()
        .map(|t| t.kind.as_str())
        .unwrap_or_default()
}

/// Split a multi-document YAML stream into objects. Empty documents are
/// skipped; any undecodable document fails the whole output.
///
/// Only string mapping keys are supported, since object data is held as
/// JSON. kustomize quotes non-string keys in its output.
pub fn parse_output(bytes: &[u8]) -> Result<BuildOutput> {
    let mut output = BuildOutput::default();

    for (document, de) in serde_yaml::Deserializer::from_slice(bytes).enumerate() {
        let value = serde_yaml::Value::deserialize(de)
            .map_err(|source| KustomizeError::Parse { document, source })?;
        if value.is_null() {
            continue;
        }

        let object: DynamicObject = serde_yaml::from_value(value)
            .map_err(|source| KustomizeError::Parse { document, source })?;
        output.images.extend(object_images(&object));
        output.objects.push(object);
    }

    Ok(output)
}

/// Images of every `containers` / `initContainers` entry found anywhere in
/// the object, in document order
pub fn object_images(object: &DynamicObject) -> Vec<Image> {
    let mut images = Vec::new();
    collect_images(&object.data, &mut images);
    images
}

fn collect_images(value: &Value, images: &mut Vec<Image>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::Array(items) if CONTAINER_KEYS.contains(&key.as_str()) => {
                        images.extend(
                            items
                                .iter()
                                .filter_map(|c| c.get(IMAGE_KEY))
                                .filter_map(Value::as_str)
                                .map(Image::new),
                        );
                    }
                    _ => collect_images(child, images),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_images(item, images);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = r#"apiVersion: v1
kind: Service
metadata:
  labels:
    app: nginx
  name: nginx
spec:
  ports:
  - port: 80
---
apiVersion: apps/v1
kind: Deployment
metadata:
  labels:
    app: nginx
  name: nginx-deployment
spec:
  template:
    spec:
      initContainers:
      - name: init
        image: busybox:1.36
      containers:
      - name: nginx
        image: nginx:1.15.5
      - name: sidecar
        image: nginx:1.15.5
---
apiVersion: batch/v1
kind: CronJob
metadata:
  name: report
spec:
  jobTemplate:
    spec:
      template:
        spec:
          containers:
          - name: report
            image: alpine
"#;

    #[test]
    fn test_parse_objects_in_order() {
        let output = parse_output(OUTPUT.as_bytes()).unwrap();
        assert_eq!(output.len(), 3);
        let kinds: Vec<_> = output.objects.iter().map(kind_of).collect();
        assert_eq!(kinds, vec!["Service", "Deployment", "CronJob"]);

        let deployment = output.find("Deployment", "nginx-deployment").unwrap();
        assert_eq!(deployment.labels().get("app"), Some(&"nginx".to_string()));
    }

    #[test]
    fn test_images_keep_order_and_duplicates() {
        let output = parse_output(OUTPUT.as_bytes()).unwrap();
        let images: Vec<_> = output.images.iter().map(Image::as_str).collect();
        assert_eq!(
            images,
            vec!["busybox:1.36", "nginx:1.15.5", "nginx:1.15.5", "alpine"]
        );
    }

    #[test]
    fn test_empty_output() {
        let output = parse_output(b"").unwrap();
        assert!(output.is_empty());
        assert!(output.images.is_empty());

        let output = parse_output(b"---\n---\n").unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_bad_document_fails_build() {
        let bytes = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: ok\n---\nkind: [unclosed\n";
        let err = parse_output(bytes).unwrap_err();
        match err {
            KustomizeError::Parse { document, .. } => assert_eq!(document, 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_string_key_fails() {
        let bytes = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  1: a\n";
        match parse_output(bytes).unwrap_err() {
            KustomizeError::Parse { document, .. } => assert_eq!(document, 0),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_find_outlives_kind() {
        let output = parse_output(OUTPUT.as_bytes()).unwrap();
        let found = {
            let kind = String::from("CronJob");
            output.find(&kind, "report")
        };
        assert_eq!(found.map(|o| o.name_any()), Some("report".to_string()));
    }

    #[test]
    fn test_of_kind() {
        let output = parse_output(OUTPUT.as_bytes()).unwrap();
        assert_eq!(output.of_kind("Deployment").count(), 1);
        assert_eq!(output.of_kind("StatefulSet").count(), 0);
        assert!(output.find("Service", "missing").is_none());
    }
}

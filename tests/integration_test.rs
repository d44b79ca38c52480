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

#[cfg(test)]
mod tests {
    use kube::ResourceExt;
    use kustomize_runner::domain::build::kind_of;
    use kustomize_runner::*;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    fn testdata(set: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("testdata")
            .join(set)
    }

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_find_kustomization() {
        for (set, expected) in [
            ("kustomization_yaml", "kustomization.yaml"),
            ("kustomization_yml", "kustomization.yml"),
            ("Kustomization", "Kustomization"),
        ] {
            let kustomization = locate(testdata(set)).unwrap();
            assert_eq!(kustomization, testdata(set).join(expected));
        }
    }

    #[test]
    fn test_is_kustomization() {
        assert!(is_kustomization_filename("kustomization.yaml"));
        assert!(is_kustomization_filename("kustomization.yml"));
        assert!(is_kustomization_filename("Kustomization"));
        assert!(!is_kustomization_filename("rubbish.yml"));
    }

    #[test]
    fn test_parse_kustomize_build_options() {
        let built = parse_build_options("guestbook", "-v 6 --logtostderr");
        assert_eq!(built, vec!["build", "guestbook", "-v", "6", "--logtostderr"]);
    }

    #[test]
    #[ignore] // Requires kustomize binary
    fn test_kustomize_build() {
        let name_prefix = "namePrefix-";
        let name_suffix = "-nameSuffix";
        let common_labels = labels(&[
            ("app.kubernetes.io/managed-by", "argo-cd"),
            ("app.kubernetes.io/part-of", "argo-cd-tests"),
        ]);
        let source = KustomizeSource {
            name_prefix: Some(name_prefix.to_string()),
            name_suffix: Some(name_suffix.to_string()),
            images: vec!["nginx:1.15.5".to_string()],
            common_labels: common_labels.clone(),
            ..Default::default()
        };

        let output = KustomizeApp::new(testdata("kustomization_yaml"))
            .build(Some(&source))
            .expect("kustomize build failed");
        assert_eq!(output.objects.len(), 2);
        assert_eq!(output.images.len(), 2);

        for object in &output.objects {
            match kind_of(object) {
                "StatefulSet" => {
                    assert_eq!(object.name_any(), "namePrefix-web-nameSuffix");
                    assert_eq!(object.labels(), &common_labels);
                }
                "Deployment" => {
                    assert_eq!(
                        object.name_any(),
                        "namePrefix-nginx-deployment-nameSuffix"
                    );
                    let mut expected = common_labels.clone();
                    expected.insert("app".to_string(), "nginx".to_string());
                    assert_eq!(object.labels(), &expected);
                }
                other => panic!("unexpected kind {}", other),
            }
        }

        let nginx = output
            .images
            .iter()
            .find(|image| image.name() == "nginx")
            .expect("nginx image not found");
        assert_eq!(nginx.tag(), Some("1.15.5"));

        // The fixture itself is left alone
        let fixture = std::fs::read_to_string(testdata("kustomization_yaml").join("kustomization.yaml"))
            .unwrap();
        assert!(!fixture.contains("namePrefix"));
    }

    #[test]
    #[ignore] // Requires kustomize binary
    fn test_kustomize_common_labels() {
        let source = KustomizeSource {
            common_labels: labels(&[("a", "x"), ("b", "y")]),
            ..Default::default()
        };

        let output = KustomizeApp::new(testdata("kustomization_yml"))
            .build(Some(&source))
            .expect("kustomize build failed");
        assert!(!output.is_empty());
        for object in &output.objects {
            assert_eq!(object.labels().get("a"), Some(&"x".to_string()));
            assert_eq!(object.labels().get("b"), Some(&"y".to_string()));
        }
        let deployment = output.find("Deployment", "nginx-deployment").unwrap();
        assert_eq!(deployment.labels().get("app"), Some(&"nginx".to_string()));
    }

    #[test]
    #[ignore] // Requires kustomize binary
    fn test_kustomize_configmap_generator() {
        let source = KustomizeSource {
            config_map_generators: vec![ConfigMapGenerator {
                name: "my-config".to_string(),
                literals: vec!["keyA=value1".to_string(), "keyB=value2".to_string()],
                files: vec!["config.properties".to_string()],
                envs: vec![],
            }],
            ..Default::default()
        };

        let output = KustomizeApp::new(testdata("configmap_generator"))
            .build(Some(&source))
            .expect("kustomize build failed");

        let config_map = output
            .of_kind("ConfigMap")
            .next()
            .expect("no ConfigMap generated");
        let name = config_map.name_any();
        assert!(name.starts_with("my-config-"), "unexpected name {}", name);
        assert!(name.len() > "my-config-".len());

        let data = &config_map.data["data"];
        assert_eq!(data["keyA"], "value1");
        assert_eq!(data["keyB"], "value2");
        assert_eq!(data["config.properties"], "log.level=debug\nlog.format=json\n");

        let deployment = output.find("Deployment", "app").unwrap();
        let pod_spec = &deployment.data["spec"]["template"]["spec"];
        assert_eq!(
            pod_spec["containers"][0]["envFrom"][0]["configMapRef"]["name"],
            name.as_str()
        );
        assert_eq!(pod_spec["volumes"][0]["configMap"]["name"], name.as_str());
    }

    #[test]
    #[ignore] // Requires kustomize binary
    fn test_version() {
        let ver = version(false).expect("kustomize version failed");
        assert!(!ver.is_empty());
    }
}

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

//! Container image references found in build output

use serde::{Deserialize, Serialize};
use std::fmt;

/// An image string exactly as it appears in a container spec,
/// e.g. `nginx`, `nginx:1.15.5`, `registry:5000/app/web@sha256:...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Image(String);

impl Image {
    pub fn new(reference: impl Into<String>) -> Self {
        Image(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Image name without tag or digest
    pub fn name(&self) -> &str {
        let without_digest = self.without_digest();
        match self.tag_separator() {
            Some(pos) => &without_digest[..pos],
            None => without_digest,
        }
    }

    /// Tag, when the reference carries one. A colon before the last slash
    /// belongs to a registry port, not a tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag_separator()
            .map(|pos| &self.without_digest()[pos + 1..])
    }

    pub fn digest(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, digest)| digest)
    }

    fn without_digest(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    fn tag_separator(&self) -> Option<usize> {
        let s = self.without_digest();
        let pos = s.rfind(':')?;
        let last_slash = s.rfind('/').unwrap_or(0);
        (pos > last_slash).then_some(pos)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Image {
    fn from(s: &str) -> Self {
        Image::new(s)
    }
}

impl AsRef<str> for Image {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let image = Image::new("nginx");
        assert_eq!(image.name(), "nginx");
        assert_eq!(image.tag(), None);
        assert_eq!(image.digest(), None);
    }

    #[test]
    fn test_name_and_tag() {
        let image = Image::new("nginx:1.15.5");
        assert_eq!(image.name(), "nginx");
        assert_eq!(image.tag(), Some("1.15.5"));
    }

    #[test]
    fn test_registry_port_is_not_a_tag() {
        let image = Image::new("localhost:5000/team/web");
        assert_eq!(image.name(), "localhost:5000/team/web");
        assert_eq!(image.tag(), None);

        let tagged = Image::new("localhost:5000/team/web:v2");
        assert_eq!(tagged.name(), "localhost:5000/team/web");
        assert_eq!(tagged.tag(), Some("v2"));
    }

    #[test]
    fn test_digest() {
        let image = Image::new("k8s.gcr.io/nginx-slim:0.8@sha256:abc123");
        assert_eq!(image.name(), "k8s.gcr.io/nginx-slim");
        assert_eq!(image.tag(), Some("0.8"));
        assert_eq!(image.digest(), Some("sha256:abc123"));
    }
}

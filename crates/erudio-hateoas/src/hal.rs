//! HAL JSON rendering.
//!
//! Plain serialization of a representation carries `links` as a list of
//! `{rel, href}` pairs (the XML and YAML shape). HAL instead groups them
//! under `_links` keyed by relation, and envelopes move their content under
//! `_embedded.<collectionRel>`.

use crate::envelope::PagedModel;
use crate::link::Link;
use crate::representation::Representation;
use erudio_core::ErudioResult;
use serde::Serialize;
use serde_json::{json, Map, Value};

const LINKS_FIELD: &str = "links";

/// Renders links as a HAL `_links` object.
///
/// A relation that appears once maps to `{"href": ...}`; a repeated one
/// maps to an array of such objects.
#[must_use]
pub fn links_object(links: &[Link]) -> Map<String, Value> {
    let mut out = Map::new();
    for link in links {
        let entry = json!({ "href": link.href });
        match out.get_mut(&link.rel) {
            None => {
                out.insert(link.rel.clone(), entry);
            }
            Some(Value::Array(existing)) => existing.push(entry),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, entry]);
            }
        }
    }
    out
}

/// Renders one representation, replacing its `links` list with `_links`.
pub fn item<R: Representation + Serialize>(representation: &R) -> ErudioResult<Value> {
    let value = serde_json::to_value(representation)?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => return Ok(other),
    };

    let mut out = Map::with_capacity(fields.len() + 1);
    for (key, field) in fields {
        if key != LINKS_FIELD {
            out.insert(key, field);
        }
    }
    if !representation.links().is_empty() {
        out.insert("_links".to_string(), Value::Object(links_object(representation.links())));
    }
    Ok(Value::Object(out))
}

/// Renders a paged envelope; `_embedded` is omitted when the page is empty.
pub fn paged<R: Representation + Serialize>(model: &PagedModel<R>) -> ErudioResult<Value> {
    let mut root = Map::new();

    if !model.content.is_empty() {
        let items = model.content.iter().map(item).collect::<ErudioResult<Vec<_>>>()?;
        let mut embedded = Map::new();
        embedded.insert(R::COLLECTION_REL.to_string(), Value::Array(items));
        root.insert("_embedded".to_string(), Value::Object(embedded));
    }

    root.insert("_links".to_string(), Value::Object(links_object(&model.links)));
    root.insert("page".to_string(), serde_json::to_value(model.page)?);

    Ok(Value::Object(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::tests::item as fixture;
    use crate::envelope::PagedModelBuilder;
    use erudio_core::{Direction, Page, PageRequest, Sort};

    const BASE: &str = "http://localhost:8888/api/person/v1";

    fn model(content_ids: &[i64], page: usize, total: u64) -> PagedModel<crate::envelope::tests::Item> {
        let request = PageRequest::new(page, 10, Sort::by("firstName", Direction::Asc)).unwrap();
        let content = content_ids.iter().copied().map(fixture).collect();
        PagedModelBuilder::new(BASE)
            .build(Page::new(content, page, 10, total), &request)
            .unwrap()
    }

    #[test]
    fn test_item_links_become_hal() {
        let mut person = fixture(499);
        person.set_self_link(format!("{BASE}/499"));
        let value = item(&person).unwrap();

        assert!(value.get("links").is_none());
        assert_eq!(value["_links"]["self"]["href"], "http://localhost:8888/api/person/v1/499");
        assert_eq!(value["firstName"], "Name 499");
    }

    #[test]
    fn test_item_without_links_has_no_links_key() {
        let value = item(&fixture(1)).unwrap();
        assert!(value.get("_links").is_none());
    }

    #[test]
    fn test_repeated_rel_becomes_array() {
        let links = vec![
            Link::new("alternate", "http://h/a"),
            Link::new("alternate", "http://h/b"),
            Link::new("alternate", "http://h/c"),
        ];
        let object = links_object(&links);
        assert_eq!(object["alternate"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_paged_envelope_shape() {
        let value = paged(&model(&[1, 2], 0, 1007)).unwrap();
        let text = serde_json::to_string(&value).unwrap();

        assert!(text.starts_with("{\"_embedded\":{\"itemList\":["));
        assert!(text.contains(r#""page":{"size":10,"totalElements":1007,"totalPages":101,"number":0}"#));
        assert_eq!(value["_embedded"]["itemList"][1]["_links"]["self"]["href"], format!("{BASE}/2"));
        assert_eq!(
            value["_links"]["next"]["href"],
            "http://localhost:8888/api/person/v1?direction=asc&page=1&size=10&sort=firstName,asc"
        );

        let rels: Vec<&String> = value["_links"].as_object().unwrap().keys().collect();
        assert_eq!(rels, vec!["first", "self", "next", "last"]);
    }

    #[test]
    fn test_empty_page_omits_embedded() {
        let value = paged(&model(&[], 5, 20)).unwrap();
        assert!(value.get("_embedded").is_none());
        assert_eq!(value["page"]["number"], 5);
    }

    #[test]
    fn test_xml_shape() {
        let xml = quick_xml::se::to_string(&model(&[1], 0, 1)).unwrap();
        assert!(xml.starts_with("<PagedModel><content><id>1</id>"));
        assert!(xml.contains("<links><rel>self</rel><href>http://localhost:8888/api/person/v1/1</href></links>"));
        assert!(xml.contains("<page><size>10</size><totalElements>1</totalElements><totalPages>1</totalPages><number>0</number></page>"));
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = serde_yaml::to_string(&model(&[1], 0, 1007)).unwrap();
        assert!(yaml.contains("totalElements: 1007"));
        assert!(yaml.contains("rel: first"));
        assert!(yaml.contains("content:"));
    }
}

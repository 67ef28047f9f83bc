//! # Tag Extraction
//!
//! One tag per folder, named by the accumulated folder path, in pre-order.
//! Requests are ignored, and empty folders still get a tag. Like the
//! endpoint walk, the traversal uses an explicit stack.

use crate::collection::CollectionNode;
use crate::oas::models::Tag;
use crate::oas::walker::join_tag_path;

/// Extracts the tag list of the tree.
pub fn extract_tags(nodes: &[CollectionNode]) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut stack = vec![(nodes.iter(), String::new())];

    while let Some((siblings, base)) = stack.last_mut() {
        match siblings.next() {
            None => {
                stack.pop();
            }
            Some(CollectionNode::Request(_)) => {}
            Some(CollectionNode::Folder(folder)) => {
                let name = join_tag_path(base, &folder.name);
                let description = folder
                    .description
                    .clone()
                    .unwrap_or_else(|| default_tag_description(&folder.name));
                tags.push(Tag::new(name.clone(), description));
                stack.push((folder.children.iter(), name));
            }
        }
    }
    tags
}

/// Description used for folders that have none.
pub fn default_tag_description(folder_name: &str) -> String {
    format!("API endpoints for {}", folder_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Folder, RequestItem, Url};

    #[test]
    fn test_pre_order_accumulated_names() {
        let nodes: Vec<CollectionNode> = vec![
            Folder::new("Videos")
                .with_description("Video management")
                .with_child(Folder::new("Uploads"))
                .with_child(RequestItem::new("GET", Url::from_segments(["videos"])))
                .with_child(Folder::new("Subtitles").with_child(Folder::new("Drafts")))
                .into(),
            RequestItem::new("GET", Url::from_segments(["health"])).into(),
            Folder::new("Projects").into(),
        ];

        let tags = extract_tags(&nodes);
        assert_eq!(
            tags,
            vec![
                Tag::new("Videos", "Video management"),
                Tag::new("Videos/Uploads", "API endpoints for Uploads"),
                Tag::new("Videos/Subtitles", "API endpoints for Subtitles"),
                Tag::new("Videos/Subtitles/Drafts", "API endpoints for Drafts"),
                Tag::new("Projects", "API endpoints for Projects"),
            ]
        );
    }

    #[test]
    fn test_deep_trees_do_not_overflow() {
        let mut node: CollectionNode = Folder::new("").into();
        for _ in 0..100_000 {
            node = Folder::new("").with_child(node).into();
        }
        let nodes = vec![node];

        let tags = extract_tags(&nodes);
        assert_eq!(tags.len(), 100_001);
        assert_eq!(tags[0], Tag::new("", "API endpoints for "));
    }

    #[test]
    fn test_requests_only_tree_has_no_tags() {
        let nodes: Vec<CollectionNode> =
            vec![RequestItem::new("GET", Url::from_segments(["a"])).into()];
        assert!(extract_tags(&nodes).is_empty());
    }
}

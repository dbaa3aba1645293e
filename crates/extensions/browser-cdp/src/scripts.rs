//! Page-side snippets evaluated through `Runtime.evaluate`.
//!
//! Element handles live in a per-page table, `window.__voxnav.nodes`, keyed by
//! ids that only ever grow, so a handle from an older query can go stale but
//! never aliases a different element.

use serde::Serialize;

use voxnav_page_hints::{HintMarker, NodeId, Scroll, ScrollTarget};

pub(crate) const OVERLAY_ID: &str = "voxnav-hints";

const NODE_TABLE: &str =
    "(window.__voxnav = window.__voxnav || { next: 1, nodes: new Map() })";

pub(crate) const VIEWPORT: &str = r#"({
  width: window.innerWidth,
  height: window.innerHeight,
  scrollX: window.scrollX,
  scrollY: window.scrollY
})"#;

fn literal<T: Serialize + ?Sized>(value: &T) -> String {
    // JSON is a JS literal. serde_json writes non-finite floats as null.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Register every match of `selector` and snapshot it.
pub(crate) fn query_elements(selector: &str) -> String {
    format!(
        r#"(() => {{
  const table = {table};
  table.nodes.clear();
  return Array.from(document.querySelectorAll({selector}), (el) => {{
    const id = table.next++;
    table.nodes.set(id, el);
    const rect = el.getBoundingClientRect();
    const style = window.getComputedStyle(el);
    const attr = (name) => el.getAttribute(name) ?? undefined;
    return {{
      node: id,
      tagName: el.tagName.toLowerCase(),
      attributes: {{
        href: attr("href"),
        type: attr("type"),
        role: attr("role"),
        onclick: attr("onclick"),
        tabindex: attr("tabindex")
      }},
      boundingBox: {{ x: rect.left, y: rect.top, width: rect.width, height: rect.height }},
      style: {{ visibility: style.visibility, display: style.display }}
    }};
  }});
}})()"#,
        table = NODE_TABLE,
        selector = literal(selector),
    )
}

/// Click a registered node. Evaluates to `false` when the handle is stale.
pub(crate) fn activate(node: NodeId) -> String {
    format!(
        r#"(() => {{
  const el = {table}.nodes.get({id});
  if (!el || !el.isConnected) return false;
  el.click();
  return true;
}})()"#,
        table = NODE_TABLE,
        id = node.0,
    )
}

pub(crate) fn mount_overlay(markers: &[HintMarker]) -> String {
    format!(
        r##"(() => {{
  document.getElementById({id})?.remove();
  const overlay = document.createElement("div");
  overlay.id = {id};
  Object.assign(overlay.style, {{
    position: "fixed", top: "0", left: "0", width: "100%", height: "100%",
    pointerEvents: "none", zIndex: "2147483647"
  }});
  for (const marker of {markers}) {{
    const hint = document.createElement("div");
    hint.textContent = marker.label;
    Object.assign(hint.style, {{
      position: "absolute",
      left: marker.bounding_box.x + "px",
      top: marker.bounding_box.y + "px",
      background: "#ff6b00", color: "#fff", padding: "2px 4px", borderRadius: "3px",
      font: "bold 12px monospace", boxShadow: "0 1px 3px rgba(0,0,0,0.3)"
    }});
    overlay.appendChild(hint);
  }}
  (document.body || document.documentElement).appendChild(overlay);
  return overlay.childElementCount;
}})()"##,
        id = literal(OVERLAY_ID),
        markers = literal(markers),
    )
}

pub(crate) fn unmount_overlay() -> String {
    format!(
        "document.getElementById({})?.remove(); {}.nodes.clear(); true",
        literal(OVERLAY_ID),
        NODE_TABLE
    )
}

pub(crate) fn scroll(scroll: Scroll) -> String {
    let behavior = if scroll.smooth { "smooth" } else { "auto" };
    match scroll.target {
        ScrollTarget::By(delta) => format!(
            "window.scrollBy({{ top: {}, behavior: {:?} }}); true",
            literal(&delta),
            behavior
        ),
        ScrollTarget::Top => format!(
            "window.scrollTo({{ top: 0, behavior: {:?} }}); true",
            behavior
        ),
        ScrollTarget::Bottom => format!(
            "window.scrollTo({{ top: (document.body || document.documentElement).scrollHeight, behavior: {:?} }}); true",
            behavior
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav_page_hints::BoundingBox;

    #[test]
    fn test_query_quotes_selector() {
        let script = query_elements(r#"input[type="text"]"#);
        assert!(script.contains(r#"querySelectorAll("input[type=\"text\"]")"#));
        assert!(script.contains("table.nodes.clear()"));
    }

    #[test]
    fn test_activate_checks_handle() {
        let script = activate(NodeId(17));
        assert!(script.contains(".nodes.get(17)"));
        assert!(script.contains("isConnected"));
    }

    #[test]
    fn test_overlay_embeds_markers_as_json() {
        let markers = vec![HintMarker {
            label: "AB".to_string(),
            node: NodeId(3),
            bounding_box: BoundingBox::new(10.0, 20.5, 30.0, 40.0),
        }];
        let script = mount_overlay(&markers);
        assert!(script.contains(r#""label":"AB""#));
        assert!(script.contains(r#""y":20.5"#));
        assert!(script.contains(r#"getElementById("voxnav-hints")?.remove()"#));
        assert!(script.contains("2147483647"));
    }

    #[test]
    fn test_overlay_escapes_labels() {
        let markers = vec![HintMarker {
            label: "</script>\"".to_string(),
            node: NodeId(1),
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        }];
        let script = mount_overlay(&markers);
        assert!(script.contains(r#""label":"</script>\"""#));
    }

    #[test]
    fn test_scroll_scripts() {
        let down = scroll(Scroll {
            target: ScrollTarget::By(-100.0),
            smooth: true,
        });
        assert!(down.contains("scrollBy({ top: -100.0, behavior: \"smooth\" })"));

        let top = scroll(Scroll {
            target: ScrollTarget::Top,
            smooth: false,
        });
        assert!(top.contains("scrollTo({ top: 0, behavior: \"auto\" })"));

        let bottom = scroll(Scroll {
            target: ScrollTarget::Bottom,
            smooth: true,
        });
        assert!(bottom.contains("scrollHeight"));
    }
}

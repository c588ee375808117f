use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let element = Element {
            tag_name,
            attrs,
            value,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            // First occurrence wins, matching getElementById on duplicate ids.
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("attribute target is not an element".into()))?;
        element.attrs.insert(name.to_string(), value.to_string());
        if name == "id" {
            self.id_index.entry(value.to_string()).or_insert(node_id);
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("attribute target is not an element".into()))?;
        element.attrs.remove(name);
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.attrs.contains_key("disabled"))
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Option<String> {
        self.element(node_id).map(|element| element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        Ok(has_class(element, class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str, on: bool) -> Result<()> {
        if on {
            self.class_add(node_id, class_name)
        } else {
            self.class_remove(node_id, class_name)
        }
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            _ => {
                for child in &self.nodes[node_id.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime("textContent target is not an element".into()));
        }
        let children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in children {
            self.detach_subtree(child);
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    fn detach_subtree(&mut self, node_id: NodeId) {
        self.nodes[node_id.0].parent = None;
        if let Some(id_attr) = self
            .element(node_id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            if self.id_index.get(&id_attr) == Some(&node_id) {
                self.id_index.remove(&id_attr);
            }
        }
        let children = self.nodes[node_id.0].children.clone();
        for child in children {
            self.detach_subtree(child);
        }
    }

    pub(crate) fn style_get(&self, node_id: NodeId, property: &str) -> Option<String> {
        let element = self.element(node_id)?;
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        decls
            .into_iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, property: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(decl) = decls.iter_mut().find(|(name, _)| name == property) {
            decl.1 = value.to_string();
        } else {
            decls.push((property.to_string(), value.to_string()));
        }
        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        Ok(())
    }

    /// An element is visible unless it, or an ancestor, carries
    /// `display:none` inline or the `hidden` attribute.
    pub(crate) fn is_visible(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if let Some(element) = self.element(current) {
                if element.attrs.contains_key("hidden") {
                    return false;
                }
                let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
                if decls
                    .iter()
                    .rev()
                    .find(|(name, _)| name == "display")
                    .is_some_and(|(_, value)| value == "none")
                {
                    return false;
                }
            }
            cursor = self.parent(current);
        }
        true
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let all = self.query_selector_all(selector)?;
        Ok(all.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.id_index.get(id).copied().into_iter().collect());
            }
        }

        let mut ids = Vec::new();
        self.collect_elements_dfs(self.root, &mut ids);
        self.filter_matches(ids, &groups)
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        let all = self.query_selector_all_from(root, selector)?;
        Ok(all.into_iter().next())
    }

    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut ids = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut ids);
        self.filter_matches(ids, &groups)
    }

    fn filter_matches(
        &self,
        candidates: Vec<NodeId>,
        groups: &[Vec<SelectorPart>],
    ) -> Result<Vec<NodeId>> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for candidate in candidates {
            if groups
                .iter()
                .any(|parts| self.matches_selector_chain(candidate, parts))
                && seen.insert(candidate)
            {
                matched.push(candidate);
            }
        }
        Ok(matched)
    }

    pub(crate) fn matches_selector(&self, node_id: NodeId, selector: &str) -> Result<bool> {
        if self.element(node_id).is_none() {
            return Ok(false);
        }
        let groups = parse_selector_groups(selector)?;
        Ok(groups
            .iter()
            .any(|parts| self.matches_selector_chain(node_id, parts)))
    }

    /// Nearest ancestor-or-self matching the selector, as `Element.closest`.
    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if self.element(current).is_some()
                && groups
                    .iter()
                    .any(|parts| self.matches_selector_chain(current, parts))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return true;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        match last.combinator {
            SelectorCombinator::Child => match self.parent(node_id) {
                Some(parent) => self.matches_selector_chain(parent, rest),
                None => false,
            },
            SelectorCombinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(current) = cursor {
                    if self.matches_selector_chain(current, rest) {
                        return true;
                    }
                    cursor = self.parent(current);
                }
                false
            }
        }
    }

    fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        if let Some(tag) = &step.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }
        for class_name in &step.classes {
            if !has_class(element, class_name) {
                return false;
            }
        }
        for condition in &step.attrs {
            match condition {
                SelectorAttrCondition::Exists { key } => {
                    if !element.attrs.contains_key(key) {
                        return false;
                    }
                }
                SelectorAttrCondition::Eq { key, value } => {
                    if element.attrs.get(key) != Some(value) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Compact one-line rendering of a node for assertion failures.
    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return "<non-element>".to_string();
        };
        let mut out = format!("<{}", element.tag_name);
        let mut attrs = element.attrs.iter().collect::<Vec<_>>();
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        let text = self.text_content(node_id);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if trimmed.len() > 60 {
                let cut = trimmed
                    .char_indices()
                    .take_while(|(at, _)| *at < 60)
                    .map(|(at, ch)| at + ch.len_utf8())
                    .last()
                    .unwrap_or(0);
                out.push_str(&trimmed[..cut]);
                out.push('…');
            } else {
                out.push_str(trimmed);
            }
        }
        out.push_str(&format!("</{}>", element.tag_name));
        out
    }
}

pub(crate) fn has_class(element: &Element, class_name: &str) -> bool {
    class_tokens(element.attrs.get("class").map(String::as_str))
        .iter()
        .any(|name| name == class_name)
}

pub(crate) fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .unwrap_or_default()
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect()
}

pub(crate) fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

pub(crate) fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut decls = Vec::new();
    let Some(style_attr) = style_attr else {
        return decls;
    };
    for raw_decl in style_attr.split(';') {
        let Some((name, value)) = raw_decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        if !name.is_empty() && !value.is_empty() {
            decls.push((name, value));
        }
    }
    decls
}

pub(crate) fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

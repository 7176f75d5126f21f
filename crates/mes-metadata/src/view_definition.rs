//! 畫面定義登錄
//!
//! 以 `"<plugin>.<view>"` 為鍵，保存已解析的畫面定義與尚未解析的動態節點。
//! 動態節點在每次查詢時重新解析，不快取結果。

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MetadataError, Result};

/// 畫面元件節點
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    #[serde(rename = "type")]
    pub component_type: String,

    pub name: String,

    #[serde(default)]
    pub children: Vec<ComponentDefinition>,
}

impl ComponentDefinition {
    pub fn new(component_type: &str, name: &str) -> Self {
        Self {
            component_type: component_type.to_string(),
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    /// 建構器模式：加入子元件
    pub fn with_child(mut self, child: ComponentDefinition) -> Self {
        self.children.push(child);
        self
    }

    /// 以名稱深度優先搜尋元件
    pub fn find(&self, name: &str) -> Option<&ComponentDefinition> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// 畫面定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    pub plugin_identifier: String,
    pub name: String,
    pub menu_accessible: bool,
    pub root: ComponentDefinition,
}

impl ViewDefinition {
    pub fn new(plugin_identifier: &str, name: &str, root: ComponentDefinition) -> Self {
        Self {
            plugin_identifier: plugin_identifier.to_string(),
            name: name.to_string(),
            menu_accessible: false,
            root,
        }
    }

    /// 建構器模式：設置是否出現在選單
    pub fn with_menu_accessible(mut self, menu_accessible: bool) -> Self {
        self.menu_accessible = menu_accessible;
        self
    }

    /// 登錄鍵
    pub fn key(&self) -> String {
        view_key(&self.plugin_identifier, &self.name)
    }
}

fn view_key(plugin_identifier: &str, view_name: &str) -> String {
    format!("{}.{}", plugin_identifier, view_name)
}

/// 動態節點解析器
pub trait ViewDefinitionParser: Send + Sync {
    fn parse_view_definition(
        &self,
        node: &Value,
        plugin_identifier: &str,
        view_name: &str,
    ) -> Result<ViewDefinition>;
}

/// JSON 節點解析器
///
/// 接受 `{"menuAccessible": bool, "root": {"type", "name", "children"}}`。
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonViewDefinitionParser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewNode {
    #[serde(default)]
    menu_accessible: bool,
    root: ComponentDefinition,
}

impl ViewDefinitionParser for JsonViewDefinitionParser {
    fn parse_view_definition(
        &self,
        node: &Value,
        plugin_identifier: &str,
        view_name: &str,
    ) -> Result<ViewDefinition> {
        let parsed = ViewNode::deserialize(node).map_err(|e| MetadataError::Parse {
            view: view_key(plugin_identifier, view_name),
            message: e.to_string(),
        })?;

        Ok(ViewDefinition::new(plugin_identifier, view_name, parsed.root)
            .with_menu_accessible(parsed.menu_accessible))
    }
}

#[derive(Default)]
struct Views {
    parsed: BTreeMap<String, ViewDefinition>,
    dynamic: BTreeMap<String, Value>,
}

/// 畫面定義登錄
///
/// 兩張表由同一把讀寫鎖保護；同一鍵下已解析的定義優先於動態節點。
pub struct ViewDefinitionRegistry {
    parser: Box<dyn ViewDefinitionParser>,
    views: RwLock<Views>,
}

impl ViewDefinitionRegistry {
    pub fn new(parser: impl ViewDefinitionParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            views: RwLock::new(Views::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Views> {
        self.views.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Views> {
        self.views.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 查詢畫面定義；動態節點於此時解析
    pub fn get(&self, plugin_identifier: &str, view_name: &str) -> Result<Option<ViewDefinition>> {
        let key = view_key(plugin_identifier, view_name);
        let views = self.read();

        if let Some(view) = views.parsed.get(&key) {
            return Ok(Some(view.clone()));
        }

        match views.dynamic.get(&key) {
            Some(node) => {
                tracing::debug!("解析動態畫面 {}", key);
                self.parser
                    .parse_view_definition(node, plugin_identifier, view_name)
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    /// 所有已解析的畫面定義，依鍵排序
    pub fn list(&self) -> Vec<ViewDefinition> {
        self.read().parsed.values().cloned().collect()
    }

    /// 出現在選單中的畫面定義
    pub fn list_for_menu(&self) -> Vec<ViewDefinition> {
        self.read()
            .parsed
            .values()
            .filter(|view| view.menu_accessible)
            .cloned()
            .collect()
    }

    pub fn save(&self, view_definition: ViewDefinition) {
        let key = view_definition.key();
        tracing::debug!("儲存畫面定義 {}", key);
        self.write().parsed.insert(key, view_definition);
    }

    /// 儲存未解析的動態節點
    pub fn save_dynamic(&self, plugin_identifier: &str, view_name: &str, node: Value) {
        let key = view_key(plugin_identifier, view_name);
        tracing::debug!("儲存動態畫面 {}", key);
        self.write().dynamic.insert(key, node);
    }

    /// 移除已解析的畫面定義（動態節點不受影響）
    pub fn delete(&self, view_definition: &ViewDefinition) {
        let key = view_definition.key();
        if self.write().parsed.remove(&key).is_some() {
            tracing::debug!("移除畫面定義 {}", key);
        }
    }
}

impl Default for ViewDefinitionRegistry {
    fn default() -> Self {
        Self::new(JsonViewDefinitionParser)
    }
}

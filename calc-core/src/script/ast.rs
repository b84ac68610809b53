//! # AST 模块
//!
//! 定义算术表达式树。
//!
//! ## 设计说明
//!
//! 表达式树是解析器的输出，自底向上构建，构建后不再修改。
//! 求值器与中缀渲染只读取它。

use serde::Serialize;

/// 运算类型
///
/// 关键字与标签中 `OPERACION=` 后的标识符一一对应（大小写不敏感）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    /// `SUMA`
    Sum,
    /// `RESTA`
    Subtract,
    /// `MULTIPLICACION`
    Multiply,
    /// `DIVISION`
    Divide,
    /// `POTENCIA`
    Power,
    /// `RAIZ`
    Root,
    /// `INVERSO`
    Inverse,
    /// `MOD`
    Mod,
}

impl OperationKind {
    /// 全部运算类型（按关键字表顺序）
    pub const ALL: [OperationKind; 8] = [
        Self::Sum,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Root,
        Self::Inverse,
        Self::Mod,
    ];

    /// 标签中使用的关键字
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Sum => "SUMA",
            Self::Subtract => "RESTA",
            Self::Multiply => "MULTIPLICACION",
            Self::Divide => "DIVISION",
            Self::Power => "POTENCIA",
            Self::Root => "RAIZ",
            Self::Inverse => "INVERSO",
            Self::Mod => "MOD",
        }
    }

    /// 从关键字解析（大小写不敏感）
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let upper = keyword.to_uppercase();
        Self::ALL.into_iter().find(|kind| kind.keyword() == upper)
    }

    /// 中缀连接符
    ///
    /// `RAIZ` 与 `INVERSO` 有专门的渲染形式，这里返回其前缀符号。
    pub fn infix_symbol(self) -> &'static str {
        match self {
            Self::Sum => " + ",
            Self::Subtract => " - ",
            Self::Multiply => " * ",
            Self::Divide => " / ",
            Self::Power => "^",
            Self::Root => "√",
            Self::Inverse => "1/",
            Self::Mod => " % ",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// 运算节点
///
/// 独占其子节点，子节点顺序即操作数顺序。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    kind: OperationKind,
    children: Vec<Node>,
}

impl Operation {
    pub fn new(kind: OperationKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// 是否包含嵌套运算（任一直接子节点为运算）
    pub fn is_compound(&self) -> bool {
        self.children
            .iter()
            .any(|child| matches!(child, Node::Operation(_)))
    }

    fn to_infix(&self) -> String {
        let parts: Vec<String> = self
            .children
            .iter()
            .map(|child| match child {
                Node::Number(_) => child.to_infix(),
                Node::Operation(_) => format!("({})", child.to_infix()),
            })
            .collect();

        match (self.kind, parts.as_slice()) {
            (OperationKind::Root, [radicand]) => format!("√{radicand}"),
            (OperationKind::Root, [index, radicand, ..]) => format!("√[{index}]{radicand}"),
            (OperationKind::Inverse, [operand, ..]) => format!("1/{operand}"),
            (kind, _) => parts.join(kind.infix_symbol()),
        }
    }
}

/// 表达式节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// 数字叶子（有限的双精度浮点数）
    Number(f64),

    /// 运算
    Operation(Operation),
}

impl Node {
    /// 创建数字节点
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// 创建运算节点
    pub fn operation(kind: OperationKind, children: Vec<Node>) -> Self {
        Self::Operation(Operation::new(kind, children))
    }

    /// 节点标签（运算关键字或数字文本），供外部绘制树使用
    pub fn label(&self) -> String {
        match self {
            Node::Number(value) => format_number(*value),
            Node::Operation(op) => op.kind.keyword().to_string(),
        }
    }

    /// 渲染为中缀表达式
    ///
    /// 嵌套运算加括号，数字不加括号。仅用于展示，不影响求值语义。
    pub fn to_infix(&self) -> String {
        match self {
            Node::Number(value) => format_number(*value),
            Node::Operation(op) => op.to_infix(),
        }
    }

    /// 运算嵌套深度（数字为 0）
    pub fn depth(&self) -> usize {
        match self {
            Node::Number(_) => 0,
            Node::Operation(op) => 1 + op.children.iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Node::Operation(op) => Some(op),
            Node::Number(_) => None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_infix())
    }
}

/// 数字的十进制文本
///
/// 采用最短往返表示，整数保留 `.0`（`2.0`、`3.14`、`0.5`）。
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

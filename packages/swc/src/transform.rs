use regex::Regex;
use serde::Deserialize;
use swc_core::atoms::Atom;
use swc_core::common::util::take::Take;
use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::{
    ast::*,
    visit::{VisitMut, VisitMutWith},
};

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// 函数名匹配规则，缺省时匹配所有函数
    /// 例如："fetch" 或 { "regex": "^test" }
    #[serde(default)]
    pub pattern: Option<PatternConfig>,

    /// 全局开关，为 false 时插件不做任何改动
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum PatternConfig {
    /// 字符串：按包含关系匹配函数名
    Literal(String),
    /// 正则：{ "regex": "^test" }
    Regex { regex: String },
}

/// 构造期编译好的匹配器，避免每个文件重复判断配置类型
#[derive(Debug)]
enum NamePattern {
    Any,
    Literal(String),
    Regex(Regex),
}

impl NamePattern {
    fn compile(pattern: Option<PatternConfig>) -> Result<Self, String> {
        match pattern {
            None => Ok(NamePattern::Any),
            Some(PatternConfig::Literal(literal)) => Ok(NamePattern::Literal(literal)),
            Some(PatternConfig::Regex { regex }) => Regex::new(&regex)
                .map(NamePattern::Regex)
                .map_err(|err| format!("invalid pattern regex `{}`: {}", regex, err)),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Any => true,
            NamePattern::Literal(literal) => name.contains(literal.as_str()),
            NamePattern::Regex(regex) => regex.is_match(name),
        }
    }
}

pub struct FunctionLoggerTransformer {
    pattern: NamePattern,
}

impl FunctionLoggerTransformer {
    /// 正则编译失败时立即返回错误，使配置问题在构造期只暴露一次，
    /// 而不是在每个文件的转换中反复出现
    pub fn new(config: PluginConfig) -> Result<Self, String> {
        Ok(Self { pattern: NamePattern::compile(config.pattern)? })
    }

    /// 构建 console.log("Entering function: <name>") 语句
    fn logging_stmt(name: &str) -> Stmt {
        Stmt::Expr(ExprStmt {
            span: DUMMY_SP,
            expr: Box::new(Expr::Call(CallExpr {
                span: DUMMY_SP,
                ctxt: SyntaxContext::empty(),
                callee: Callee::Expr(Box::new(Expr::Member(MemberExpr {
                    span: DUMMY_SP,
                    obj: Box::new(Expr::Ident(Ident::new_no_ctxt("console".into(), DUMMY_SP))),
                    prop: MemberProp::Ident(IdentName::new("log".into(), DUMMY_SP)),
                }))),
                args: vec![ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Lit(Lit::Str(Str {
                        span: DUMMY_SP,
                        value: format!("Entering function: {}", name).into(),
                        raw: None,
                    }))),
                }],
                type_args: None,
            })),
        })
    }

    /// 从变量声明中解析箭头函数的名字
    /// 只有绑定到普通标识符的箭头函数才有可用的名字，
    /// 解构绑定返回 None
    fn arrow_name(declarator: &VarDeclarator) -> Option<Atom> {
        match &declarator.name {
            Pat::Ident(binding) => Some(binding.id.sym.clone()),
            _ => None,
        }
    }

    fn instrument_arrow(&self, arrow: &mut ArrowExpr, name: &str) {
        match &mut *arrow.body {
            // 块体：直接在开头插入日志语句
            BlockStmtOrExpr::BlockStmt(block) => {
                block.stmts.insert(0, Self::logging_stmt(name));
            }
            // 表达式体（隐式返回）：改写为块体，
            // 日志语句后跟对原表达式的显式 return
            BlockStmtOrExpr::Expr(expr) => {
                let original = expr.take();
                *arrow.body = BlockStmtOrExpr::BlockStmt(BlockStmt {
                    span: DUMMY_SP,
                    ctxt: SyntaxContext::empty(),
                    stmts: vec![
                        Self::logging_stmt(name),
                        Stmt::Return(ReturnStmt { span: DUMMY_SP, arg: Some(original) }),
                    ],
                });
            }
        }
    }
}

impl VisitMut for FunctionLoggerTransformer {
    fn visit_mut_fn_decl(&mut self, fn_decl: &mut FnDecl) {
        // 先处理嵌套函数，再修改当前节点，
        // 插入的日志语句不会被再次遍历
        fn_decl.visit_mut_children_with(self);

        if !self.pattern.matches(&fn_decl.ident.sym) {
            return;
        }

        // TypeScript 重载签名没有函数体，跳过
        if let Some(body) = &mut fn_decl.function.body {
            body.stmts.insert(0, Self::logging_stmt(&fn_decl.ident.sym));
        }
    }

    fn visit_mut_var_declarator(&mut self, declarator: &mut VarDeclarator) {
        declarator.visit_mut_children_with(self);

        let Some(name) = Self::arrow_name(declarator) else {
            return;
        };
        if !self.pattern.matches(&name) {
            return;
        }

        if let Some(init) = &mut declarator.init {
            if let Expr::Arrow(arrow) = &mut **init {
                self.instrument_arrow(arrow, &name);
            }
        }
    }
}

use swc_core::ecma::{ast::Program, visit::visit_mut_pass};
use swc_core::plugin::{plugin_transform, proxies::TransformPluginProgramMetadata};

mod transform;

use transform::{FunctionLoggerTransformer, PluginConfig};

#[plugin_transform]
pub fn process_transform(program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let raw_config = metadata
        .get_transform_plugin_config()
        .unwrap_or_else(|| "{}".to_string());
    let config: PluginConfig = serde_json::from_str(&raw_config)
        .expect("swc_plugin_function_logger: failed to parse plugin configuration");

    // 禁用时直接返回，不构造访问器
    if !config.enabled {
        return program;
    }

    let transformer = FunctionLoggerTransformer::new(config)
        .expect("swc_plugin_function_logger: invalid plugin configuration");

    program.apply(&mut visit_mut_pass(transformer))
}

use regex::Regex;
use std::collections::HashMap;

/// 模板占位符替换
///
/// 将模板中每个 `{identifier}` (identifier为单词字符) 替换为
/// variables 中对应的值;没有匹配键的占位符原样保留,既不删除
/// 也不报错。纯函数,对任何输入都有定义。
///
/// # 示例
/// ```
/// use std::collections::HashMap;
/// use cashier_order::utils::string_utils::template_replace;
///
/// let vars = HashMap::from([("chainName".to_string(), "TRON".to_string())]);
/// assert_eq!(template_replace("use {chainName} network", &vars), "use TRON network");
/// ```
pub fn template_replace(template: &str, variables: &HashMap<String, String>) -> String {
    let placeholder = Regex::new(r"\{(\w+)\}").expect("占位符正则必然有效");

    placeholder
        .replace_all(template, |caps: &regex::Captures| {
            let key = &caps[1];
            match variables.get(key) {
                Some(value) => value.clone(),
                // 缺失键: 占位符原样保留
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// 检查是否为有效的非空字符串
///
/// None 与空串均视为无效,用于轮询启动前的参数校验。
pub fn is_valid_string(value: Option<&str>) -> bool {
    matches!(value, Some(s) if !s.is_empty())
}

//! Personal information security specification, GB/T 35273-2020.

use super::{dimension, item};
use crate::template::Template;

/// One dimension per stage of the personal-information lifecycle.
pub fn template() -> Template {
    Template {
        id: "grxxb".to_string(),
        name: "个人信息安全规范".to_string(),
        standard_no: "GB/T 35273-2020".to_string(),
        version: "2020".to_string(),
        description: "个人信息安全规范，适用于各类组织的个人信息处理活动".to_string(),
        dimensions: vec![
            dimension("collect", "收集", 0.2),
            dimension("store", "存储", 0.2),
            dimension("use", "使用", 0.2),
            dimension("share", "共享转让", 0.2),
            dimension("delete", "删除", 0.2),
        ],
        items: vec![
            item("grxxb-collect-01", "collect", "基础", "是否公开收集使用规则"),
            item("grxxb-collect-02", "collect", "基础", "是否明示收集目的、方式和范围"),
            item("grxxb-collect-03", "collect", "基础", "是否征得用户同意"),
            item("grxxb-collect-04", "collect", "基础", "是否遵循最小必要原则"),
            item("grxxb-store-01", "store", "基础", "是否采取加密存储措施"),
            item("grxxb-store-02", "store", "基础", "是否设定存储期限"),
            item("grxxb-store-03", "store", "基础", "是否采取去标识化措施"),
            item("grxxb-use-01", "use", "基础", "是否按约定目的使用个人信息"),
            item("grxxb-use-02", "use", "基础", "是否限制访问权限"),
            item("grxxb-use-03", "use", "基础", "是否进行安全影响评估"),
            item("grxxb-share-01", "share", "基础", "共享前是否进行安全评估"),
            item("grxxb-share-02", "share", "基础", "是否与接收方签订协议"),
            item("grxxb-share-03", "share", "基础", "是否告知用户共享情况"),
            item("grxxb-delete-01", "delete", "基础", "是否响应用户删除请求"),
            item("grxxb-delete-02", "delete", "基础", "超期后是否及时删除"),
        ],
    }
}

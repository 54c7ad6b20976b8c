//! Data Security Capability Maturity Model (DSMM), GB/T 37988-2019.

use super::{dimension, item};
use crate::template::Template;

/// DSMM template: organization, policy, technology and people dimensions,
/// equally weighted, items graded by maturity level 1 to 4.
pub fn template() -> Template {
    Template {
        id: "dsmm".to_string(),
        name: "数据安全能力成熟度模型 (DSMM)".to_string(),
        standard_no: "GB/T 37988-2019".to_string(),
        version: "2019".to_string(),
        description: "数据安全能力成熟度模型，从组织建设、制度流程、技术工具、人员能力四个维度评估数据安全能力"
            .to_string(),
        dimensions: vec![
            dimension("org", "组织建设", 0.25),
            dimension("policy", "制度流程", 0.25),
            dimension("tech", "技术工具", 0.25),
            dimension("people", "人员能力", 0.25),
        ],
        items: vec![
            item("dsmm-org-01", "org", "1", "是否建立了数据安全组织架构"),
            item("dsmm-org-02", "org", "1", "是否明确数据安全责任部门和责任人"),
            item("dsmm-org-03", "org", "2", "是否设立数据安全决策机构"),
            item("dsmm-org-04", "org", "2", "是否建立数据安全协调机制"),
            item("dsmm-org-05", "org", "3", "是否建立数据安全绩效考核机制"),
            item("dsmm-policy-01", "policy", "1", "是否制定数据安全总体方针"),
            item("dsmm-policy-02", "policy", "1", "是否制定数据安全管理制度"),
            item("dsmm-policy-03", "policy", "2", "是否制定数据分类分级管理规范"),
            item("dsmm-policy-04", "policy", "2", "是否建立数据安全操作规程"),
            item("dsmm-policy-05", "policy", "3", "是否定期评审和更新安全制度"),
            item("dsmm-tech-01", "tech", "1", "是否部署基础安全防护工具"),
            item("dsmm-tech-02", "tech", "2", "是否实现数据加密存储"),
            item("dsmm-tech-03", "tech", "2", "是否实现数据传输加密"),
            item("dsmm-tech-04", "tech", "3", "是否建立数据访问控制机制"),
            item("dsmm-tech-05", "tech", "3", "是否部署数据安全审计系统"),
            item("dsmm-tech-06", "tech", "4", "是否实现数据安全态势感知"),
            item("dsmm-people-01", "people", "1", "是否开展数据安全意识培训"),
            item("dsmm-people-02", "people", "2", "是否对关键岗位人员进行专业技能培训"),
            item("dsmm-people-03", "people", "2", "是否签订保密协议"),
            item("dsmm-people-04", "people", "3", "是否建立人员能力评估机制"),
            item("dsmm-people-05", "people", "4", "是否建立数据安全专业认证体系"),
        ],
    }
}

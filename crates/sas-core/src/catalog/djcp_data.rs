//! Classified protection data-security baseline, GA/T 2380-2026.
//!
//! Two renderings share the seven data-lifecycle dimensions: level 1
//! (self-protection, clauses 4.1 to 4.8) and level 3 (supervised protection,
//! for critical information infrastructure).

use super::{dimension, item};
use crate::template::{Dimension, Template};

const STANDARD_NO: &str = "GA/T 2380-2026";

fn lifecycle_dimensions(collect_weight: f64, delete_weight: f64) -> Vec<Dimension> {
    vec![
        dimension("data_classify", "数据分类分级", 0.15),
        dimension("data_collect", "数据采集安全", collect_weight),
        dimension("data_transfer", "数据传输安全", 0.15),
        dimension("data_store", "数据存储安全", 0.15),
        dimension("data_use", "数据使用安全", 0.15),
        dimension("data_share", "数据交换共享", 0.15),
        dimension("data_delete", "数据销毁安全", delete_weight),
    ]
}

/// Level 1 (自主保护级): nine basic requirements, one item per clause or sub-clause.
pub fn level1_template() -> Template {
    Template {
        id: "djcp_data_level1".to_string(),
        name: "信息安全技术 网络安全等级保护数据安全基本要求（第一级）".to_string(),
        standard_no: STANDARD_NO.to_string(),
        version: "2026".to_string(),
        description: "公共安全行业标准 - 网络安全等级保护数据安全基本要求 第一级（自主保护级），适用于一般信息系统。包含 4.1-4.8 共 9 条基本要求。"
            .to_string(),
        dimensions: lifecycle_dimensions(0.10, 0.15),
        items: vec![
            item("djcp-data-l1-4.1", "data_classify", "一级", "4.1 应建立数据分类分级管理制度，明确数据分类分级方法和管理要求"),
            item("djcp-data-l1-4.2", "data_collect", "一级", "4.2 应明确数据采集的目的、方式和范围，遵循合法、正当、必要的原则"),
            item("djcp-data-l1-4.3-a", "data_transfer", "一级", "4.3 a) 应在重要数据传输前进行加密处理"),
            item("djcp-data-l1-4.3-b", "data_transfer", "一级", "4.3 b) 应采用安全的传输协议进行数据传输"),
            item("djcp-data-l1-4.4-a", "data_store", "一级", "4.4 a) 应对重要数据存储进行加密保护"),
            item("djcp-data-l1-4.4-b", "data_store", "一级", "4.4 b) 应建立数据备份机制，定期备份重要数据"),
            item("djcp-data-l1-4.5", "data_use", "一级", "4.5 应建立数据访问控制机制，根据业务需要分配数据访问权限"),
            item("djcp-data-l1-4.6", "data_share", "一级", "4.6 应在数据交换共享前与接收方签订安全协议，明确安全责任和保护要求"),
            item("djcp-data-l1-4.7", "data_delete", "一级", "4.7 应建立数据销毁管理制度，采用技术手段确保数据无法被恢复"),
            // Incident response is scored under data use.
            item("djcp-data-l1-4.8", "data_use", "一级", "4.8 应建立数据安全事件应急处置机制，及时响应和处置数据安全事件"),
        ],
    }
}

/// Level 3 (监督保护级): level-2 baseline items plus level-3 additions per dimension.
pub fn level3_template() -> Template {
    Template {
        id: "djcp_data".to_string(),
        name: "信息安全技术 网络安全等级保护数据安全基本要求（第三级）".to_string(),
        standard_no: STANDARD_NO.to_string(),
        version: "2026".to_string(),
        description: "公共安全行业标准 - 网络安全等级保护数据安全基本要求 第三级（监督保护级），适用于关键信息基础设施和重要信息系统。评估选项：满足、部分满足、不满足、不适用"
            .to_string(),
        dimensions: lifecycle_dimensions(0.15, 0.10),
        items: vec![
            item("djcp-data-class-01", "data_classify", "二级", "是否建立数据分类分级管理制度"),
            item("djcp-data-class-02", "data_classify", "二级", "是否识别重要数据和核心数据"),
            item("djcp-data-class-03", "data_classify", "二级", "是否制定数据分类分级指南"),
            item("djcp-data-class-04", "data_classify", "三级", "是否建立数据分类分级动态调整机制"),
            item("djcp-data-class-05", "data_classify", "三级", "是否对不同级别数据实施差异化保护"),
            item("djcp-data-coll-01", "data_collect", "二级", "是否明确数据采集目的和范围"),
            item("djcp-data-coll-02", "data_collect", "二级", "是否遵循最小必要原则采集数据"),
            item("djcp-data-coll-03", "data_collect", "二级", "是否验证数据来源的合法性和真实性"),
            item("djcp-data-coll-04", "data_collect", "三级", "是否对采集的个人信息征得用户同意"),
            item("djcp-data-coll-05", "data_collect", "三级", "是否建立采集数据质量校验机制"),
            item("djcp-data-coll-06", "data_collect", "三级", "是否对批量采集行为进行安全评估"),
            item("djcp-data-trans-01", "data_transfer", "二级", "是否对敏感数据传输进行加密"),
            item("djcp-data-trans-02", "data_transfer", "二级", "是否采用安全的传输协议 (如 HTTPS/TLS)"),
            item("djcp-data-trans-03", "data_transfer", "二级", "是否验证通信双方身份"),
            item("djcp-data-trans-04", "data_transfer", "三级", "是否对重要数据实施端到端加密"),
            item("djcp-data-trans-05", "data_transfer", "三级", "是否建立数据传输完整性校验机制"),
            item("djcp-data-trans-06", "data_transfer", "三级", "是否对跨境数据传输进行安全评估"),
            item("djcp-data-store-01", "data_store", "二级", "是否对存储的敏感数据进行加密"),
            item("djcp-data-store-02", "data_store", "二级", "是否建立数据备份机制"),
            item("djcp-data-store-03", "data_store", "二级", "是否定期测试数据恢复能力"),
            item("djcp-data-store-04", "data_store", "三级", "是否对重要数据实施异地备份"),
            item("djcp-data-store-05", "data_store", "三级", "是否建立存储介质安全管理制度"),
            item("djcp-data-store-06", "data_store", "三级", "是否对数据库实施访问控制和审计"),
            item("djcp-data-store-07", "data_store", "三级", "是否设定数据存储期限并定期清理"),
            item("djcp-data-use-01", "data_use", "二级", "是否建立数据访问权限管理制度"),
            item("djcp-data-use-02", "data_use", "二级", "是否实施数据访问权限审批"),
            item("djcp-data-use-03", "data_use", "二级", "是否遵循权限最小化原则"),
            item("djcp-data-use-04", "data_use", "三级", "是否对重要数据操作进行审计记录"),
            item("djcp-data-use-05", "data_use", "三级", "是否对敏感数据展示进行脱敏处理"),
            item("djcp-data-use-06", "data_use", "三级", "是否建立数据使用安全监控机制"),
            item("djcp-data-use-07", "data_use", "三级", "是否对批量导出行为进行审批和审计"),
            item("djcp-data-use-08", "data_use", "三级", "是否建立数据使用安全事件应急响应机制"),
            item("djcp-data-share-01", "data_share", "二级", "是否建立数据共享安全管理制度"),
            item("djcp-data-share-02", "data_share", "二级", "是否与数据接收方签订安全协议"),
            item("djcp-data-share-03", "data_share", "二级", "是否验证数据接收方的安全保护能力"),
            item("djcp-data-share-04", "data_share", "三级", "是否对数据共享进行安全影响评估"),
            item("djcp-data-share-05", "data_share", "三级", "是否对共享数据进行分类分级标识"),
            item("djcp-data-share-06", "data_share", "三级", "是否建立数据共享审计和追溯机制"),
            item("djcp-data-share-07", "data_share", "三级", "是否对数据转让行为进行审批"),
            item("djcp-data-del-01", "data_delete", "二级", "是否建立数据销毁管理制度"),
            item("djcp-data-del-02", "data_delete", "二级", "是否对存储介质进行安全销毁"),
            item("djcp-data-del-03", "data_delete", "二级", "是否记录数据销毁过程"),
            item("djcp-data-del-04", "data_delete", "三级", "是否采用不可恢复的销毁方式"),
            item("djcp-data-del-05", "data_delete", "三级", "是否对数据销毁进行监督和验证"),
            item("djcp-data-del-06", "data_delete", "三级", "是否对委托销毁进行安全管控"),
        ],
    }
}

//! Cybersecurity classified protection baseline (等保 2.0), GB/T 22239-2019.
//!
//! Simplified rendering for level-2 and above systems. Technical
//! requirements cover the physical environment, communication network, area
//! boundary and computing environment; management requirements cover policy,
//! organization, personnel, construction and operations.

use super::{dimension, item};
use crate::template::Template;

pub fn template() -> Template {
    Template {
        id: "djcp".to_string(),
        name: "网络安全等级保护基本要求".to_string(),
        standard_no: "GB/T 22239-2019".to_string(),
        version: "2019".to_string(),
        description: "网络安全等级保护 2.0 基本要求，适用于第二级及以上信息系统".to_string(),
        dimensions: vec![
            dimension("tech", "技术要求", 0.6),
            dimension("manage", "管理要求", 0.4),
        ],
        items: vec![
            // Physical environment
            item("djcp-tech-01", "tech", "2", "机房选址是否符合安全要求"),
            item("djcp-tech-02", "tech", "2", "是否部署门禁系统"),
            item("djcp-tech-03", "tech", "2", "是否配置消防设施"),
            item("djcp-tech-04", "tech", "2", "是否配置 UPS 不间断电源"),
            // Communication network
            item("djcp-tech-05", "tech", "2", "网络架构是否合理划分安全域"),
            item("djcp-tech-06", "tech", "2", "是否部署防火墙"),
            item("djcp-tech-07", "tech", "2", "通信传输是否加密"),
            // Area boundary
            item("djcp-tech-08", "tech", "2", "是否部署入侵检测系统"),
            item("djcp-tech-09", "tech", "2", "是否部署恶意代码防护"),
            // Computing environment
            item("djcp-tech-10", "tech", "2", "是否实施身份鉴别"),
            item("djcp-tech-11", "tech", "2", "是否实施访问控制"),
            item("djcp-tech-12", "tech", "2", "是否部署安全审计"),
            item("djcp-manage-01", "manage", "2", "是否建立网络安全管理制度"),
            item("djcp-manage-02", "manage", "2", "是否定期评审安全制度"),
            item("djcp-manage-03", "manage", "2", "是否设立网络安全管理部门"),
            item("djcp-manage-04", "manage", "2", "是否配备专职安全管理人员"),
            item("djcp-manage-05", "manage", "2", "是否开展安全意识培训"),
            item("djcp-manage-06", "manage", "2", "是否签订保密协议"),
            item("djcp-manage-07", "manage", "2", "是否进行安全方案设计"),
            item("djcp-manage-08", "manage", "2", "是否进行产品采购管理"),
            item("djcp-manage-09", "manage", "2", "是否建立日常运维管理制度"),
            item("djcp-manage-10", "manage", "2", "是否制定应急预案并演练"),
        ],
    }
}

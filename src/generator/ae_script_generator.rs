//! # After Effects 脚本生成器
//!
//! 模板来自 LyricalAE 的歌词动画脚本，全部属性访问使用 ADBE
//! Match Name，保证在任何语言版本的 AE 中都能运行。`ADBE` 名称是
//! 宿主应用的外部契约，必须逐字保留。

use crate::{config::ScriptConfig, parser::lrc_parser::LRC_TIMESTAMP_PATTERN};

/// 导出脚本时建议使用的文件名。
pub const SCRIPT_FILE_NAME: &str = "LyricalAE_Script.jsx";

/// 转义将被嵌入 ExtendScript 字符串字面量的用户输入。
///
/// 字体名或合成名中的引号、反斜杠如果不转义会直接破坏生成的脚本。
fn escape_extendscript_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 生成完整的 AE 歌词脚本文本。
///
/// 纯函数：同一配置两次调用产生逐字节相同的输出。配置中的数值
/// 不做范围校验，原样写入脚本（见 [`crate::config::ScriptConfig`]）。
#[must_use]
pub fn generate_ae_script(config: &ScriptConfig) -> String {
    let mut script = String::with_capacity(12 * 1024);
    script.push_str(SCRIPT_HEADER);
    write_config_block(&mut script, config);
    script.push_str(UI_BUILDER);
    write_embedded_parser(&mut script);
    script.push_str(LAYER_BUILDER);
    script.push_str(SCRIPT_FOOTER);
    script
}

/// 生成可直接写入磁盘的脚本文件内容。
///
/// 文件以 UTF-8 BOM 开头，确保 Windows 上的 AE 正确识别编码。
#[must_use]
pub fn script_file_contents(config: &ScriptConfig) -> String {
    format!("\u{FEFF}{}", generate_ae_script(config))
}

/// 写入 `var cfg = {...}` 配置块，这是模板中唯一的参数化部分。
fn write_config_block(out: &mut String, config: &ScriptConfig) {
    out.push_str("        // --- CONFIGURATION ---\n");
    out.push_str("        var cfg = {\n");
    out.push_str(&format!(
        "            compName: \"{}\",\n",
        escape_extendscript_string(&config.comp_name)
    ));
    out.push_str(&format!("            width: {},\n", config.comp_width));
    out.push_str(&format!("            height: {},\n", config.comp_height));
    out.push_str(&format!("            fps: {},\n", config.fps));
    out.push_str(&format!("            duration: {},\n", config.duration_secs));
    out.push_str(&format!("            fontSize: {},\n", config.font_size));
    out.push_str(&format!(
        "            font: \"{}\",\n",
        escape_extendscript_string(&config.font_family)
    ));
    out.push_str(&format!(
        "            textColor: [{}], // Active\n",
        config.text_color.to_ae_color_literal()
    ));
    out.push_str(&format!(
        "            inactiveColor: [{}], // Inactive\n",
        config.inactive_text_color.to_ae_color_literal()
    ));
    out.push_str(&format!(
        "            inactiveOpacity: {},\n",
        config.inactive_opacity
    ));
    out.push_str(&format!("            spacing: {},\n", config.spacing));
    out.push_str(&format!("            blurMax: {},\n", config.blur_amount));
    out.push_str(&format!("            activeScale: {},\n", config.active_scale));
    out.push_str(&format!("            damping: {},\n", config.motion_damping));
    out.push_str(&format!("            alignment: \"{}\",\n", config.alignment));
    out.push_str(&format!("            textLift: {}\n", config.text_lift));
    out.push_str("        };\n");
}

/// 写入脚本内嵌的 LRC 解析器。
///
/// 正则模式来自 [`LRC_TIMESTAMP_PATTERN`]，与本库的解析器共享同一份
/// 定义，两侧的解析行为在构造上保持一致。
fn write_embedded_parser(out: &mut String) {
    out.push_str(
        r##"
        function parseLrc(text) {
            var lines = text.split(/(\r\n|\r|\n)/);
            var result = [];
"##,
    );
    out.push_str(&format!(
        "            var regex = /{LRC_TIMESTAMP_PATTERN}(.*)/;\n"
    ));
    out.push_str(
        r##"
            for (var i = 0; i < lines.length; i++) {
                var match = lines[i].match(regex);
                if (match) {
                    var mins = parseInt(match[1], 10);
                    var secs = parseInt(match[2], 10);
                    var ms = parseInt(match[3], 10);
                    if (match[3].length === 2) ms *= 10;

                    var time = mins * 60 + secs + (ms / 1000);
                    var txt = match[4].replace(/^\s+|\s+$/g, '');

                    if (txt.length > 0) {
                        result.push({time: time, text: txt});
                    }
                }
            }
            return result;
        }
"##,
    );
}

const SCRIPT_HEADER: &str = r##"
/**
 * LyricalAE - 歌词生成脚本 (多语言兼容版)
 *
 * 使用说明:
 * 1. 菜单 文件 (File) > 脚本 (Scripts) > 运行脚本文件 (Run Script File...)
 * 2. 选择本 .jsx 文件
 * 3. 导入 LRC 并点击“生成歌词序列”
 */

{
    function LyricalAEScript(thisObj) {
        var scriptName = "LyricalAE 歌词助手";

"##;

const UI_BUILDER: &str = r##"
        // --- UI BUILDER ---
        function buildUI(thisObj) {
            var win = (thisObj instanceof Panel) ? thisObj : new Window("palette", scriptName, undefined, {resizeable: true});
            win.orientation = "column";
            win.alignChildren = ["fill", "top"];
            win.spacing = 10;
            win.margins = 16;

            var grpInfo = win.add("group");
            grpInfo.orientation = "column";
            grpInfo.alignChildren = ["left", "center"];
            grpInfo.add("statictext", undefined, "1. 选择 .lrc 歌词文件");
            grpInfo.add("statictext", undefined, "2. 点击 '生成歌词序列'");

            var btnGroup = win.add("group");
            btnGroup.orientation = "row";
            var btnImport = btnGroup.add("button", undefined, "选择 LRC...");
            var stPath = win.add("statictext", undefined, "未选择文件", {truncate: "middle"});
            stPath.preferredSize.width = 200;

            var btnBuild = win.add("button", undefined, "生成歌词序列");
            btnBuild.enabled = false;

            var progressBar = win.add("progressbar", undefined, 0, 100);
            progressBar.preferredSize.width = 250;
            progressBar.visible = false;

            var lrcFile = null;

            btnImport.onClick = function() {
                var f = File.openDialog("请选择 LRC 文件", "*.lrc;*.txt");
                if (f) {
                    lrcFile = f;
                    stPath.text = f.name;
                    btnBuild.enabled = true;
                }
            };

            btnBuild.onClick = function() {
                if (!lrcFile || !lrcFile.exists) {
                    alert("请选择有效的 LRC 文件。");
                    return;
                }

                app.beginUndoGroup("LyricalAE 生成");
                try {
                    progressBar.visible = true;
                    progressBar.value = 0;

                    lrcFile.open("r");
                    lrcFile.encoding = "UTF-8";
                    var content = lrcFile.read();
                    lrcFile.close();

                    var lines = parseLrc(content);
                    if (lines.length === 0) {
                        alert("未找到有效的歌词行。请检查文件格式。");
                        return;
                    }

                    var comp = app.project.items.addComp(cfg.compName, cfg.width, cfg.height, 1, cfg.duration, cfg.fps);
                    comp.openInViewer();

                    var ctrl = comp.layers.addNull();
                    ctrl.name = "Controller (控制层)";
                    // ADBE Slider Control = Slider Control
                    var slider = ctrl.property("ADBE Effect Parade").addProperty("ADBE Slider Control");
                    slider.name = "Scroll Y";

                    createLyricLayers(comp, lines, ctrl, progressBar);

                    progressBar.value = 100;
                    alert("成功！已生成 " + lines.length + " 行歌词。");
                } catch(e) {
                    alert("发生错误: " + e.toString() + "\n行号: " + e.line);
                } finally {
                    app.endUndoGroup();
                    progressBar.visible = false;
                }
            };

            win.layout.layout(true);
            return win;
        }
"##;

const LAYER_BUILDER: &str = r##"
        function createLyricLayers(comp, lines, ctrl, pb) {
            // Using the user-set name "Scroll Y" to retrieve the property.
            var activeIndexProp = ctrl.property("ADBE Effect Parade").property("Scroll Y").property("ADBE Slider Control-0001");

            // Setup Keys for Active Index
            for (var i = 0; i < lines.length; i++) {
                var t = lines[i].time;
                var keyIndex = activeIndexProp.addKey(t);
                activeIndexProp.setValueAtKey(keyIndex, i);
                activeIndexProp.setInterpolationTypeAtKey(keyIndex, KeyframeInterpolationType.HOLD, KeyframeInterpolationType.HOLD);
            }

            // Create Smooth Index
            var smoothEffect = ctrl.property("ADBE Effect Parade").addProperty("ADBE Slider Control");
            smoothEffect.name = "Smooth Index";
            var smoothSliderProp = smoothEffect.property("ADBE Slider Control-0001");

            // Bounce Expression for "Viscous/Sticky" feel
            var bounceExpr =
                "var amp = " + (0.5 * cfg.damping) + ";\n" +
                "var freq = 1.2;\n" +
                "var decay = 5.0;\n" +
                "var n = 0;\n" +
                "var t = 0;\n" +
                "// Use match names in expression for safety\n" +
                "var activeVal = thisComp.layer('" + ctrl.name + "').effect('Scroll Y')('ADBE Slider Control-0001');\n" +
                "if (activeVal.numKeys > 0) {\n" +
                "  n = activeVal.nearestKey(time).index;\n" +
                "  if (activeVal.key(n).time > time) n--;\n" +
                "}\n" +
                "if (n <= 0) {\n" +
                "  t = 0;\n" +
                "} else {\n" +
                "  t = time - activeVal.key(n).time;\n" +
                "}\n" +
                "if (n > 0 && t < 2) {\n" +
                "  var val = activeVal.value;\n" +
                "  var prevVal = (n > 1) ? activeVal.key(n-1).value : 0;\n" +
                "  var diff = val - prevVal;\n" +
                "  val - diff * Math.sin(t * freq * Math.PI * 2) / Math.exp(t * decay) * amp;\n" +
                "} else {\n" +
                "  activeVal.value;\n" +
                "}";

            smoothSliderProp.expression = bounceExpr;

            var spacing = cfg.spacing;
            var isLeft = (cfg.alignment === "left");
            var xPos = isLeft ? (comp.width * 0.1) : (comp.width / 2);
            var yCenter = comp.height / 2;

            for (var i = 0; i < lines.length; i++) {
                var l = lines[i];
                var tStart = l.time;
                var tEnd = (i < lines.length - 1) ? lines[i+1].time : (l.time + 5.0);

                var tLayer = comp.layers.addText(l.text);
                // ADBE Text Properties -> ADBE Text Document
                var tProp = tLayer.property("ADBE Text Properties").property("ADBE Text Document");
                var tDoc = tProp.value;

                tDoc.fontSize = cfg.fontSize;
                tDoc.fillColor = cfg.inactiveColor;
                tDoc.justification = isLeft ? ParagraphJustification.LEFT_JUSTIFY : ParagraphJustification.CENTER_JUSTIFY;
                try { tDoc.font = cfg.font; } catch (e) {}
                tProp.setValue(tDoc);

                tLayer.property("ADBE Transform Group").property("ADBE Position").setValue([xPos, yCenter]);
                tLayer.property("ADBE Transform Group").property("ADBE Anchor Point").setValue([0, 0]);

                // --- ANIMATOR (Fill & Lift) ---

                var textGroup = tLayer.property("ADBE Text Properties");
                var animators = textGroup.property("ADBE Text Animators");
                var animGroup = animators.addProperty("ADBE Text Animator");
                animGroup.name = "Highlight Animator";

                // ADBE Text Animator Properties
                var animProps = animGroup.property("ADBE Text Animator Properties");

                // 1. Fill Color (Turns Active)
                var fillProp = animProps.addProperty("ADBE Text Fill Color");
                fillProp.setValue(cfg.textColor);

                // 2. Position Lift (Moves Up)
                // Robust fallback logic for 2D vs 3D position property
                var posProp = null;
                function addAnimatorProperty(propsGroup, matchName) {
                    try { return propsGroup.addProperty(matchName); } catch(e) { return null; }
                }

                posProp = addAnimatorProperty(animProps, "ADBE Text Position");
                if (!posProp) {
                     posProp = addAnimatorProperty(animProps, "ADBE Text Position 3D");
                }

                if (posProp) {
                    if (posProp.value.length === 3) {
                         posProp.setValue([0, -cfg.textLift, 0]);
                    } else {
                         posProp.setValue([0, -cfg.textLift]);
                    }
                }

                // Access Range Selector
                var selectors = animGroup.property("ADBE Text Selectors");

                // Remove existing selectors to ensure clean state
                while (selectors.numProperties > 0) {
                    selectors.property(1).remove();
                }

                var rangeSelector = selectors.addProperty("ADBE Text Selector");

                // ADBE Text Percent End
                var endProp = rangeSelector.property("ADBE Text Percent End");

                // Use ease() instead of linear() for smoother character animation
                var fillExpr =
                    "ease(time, " + tStart + ", " + tEnd + ", 0, 100);";
                endProp.expression = fillExpr;

                // --- TRANSFORM EXPRESSIONS ---
                // Position
                var posExpr =
                    "var idx = " + i + ";\n" +
                    "var activeIdx = thisComp.layer('" + ctrl.name + "').effect('Smooth Index')('ADBE Slider Control-0001');\n" +
                    "var diff = idx - activeIdx;\n" +
                    "value + [0, diff * " + spacing + "];";
                tLayer.property("ADBE Transform Group").property("ADBE Position").expression = posExpr;

                // Scale
                var scaleExpr =
                    "var idx = " + i + ";\n" +
                    "var activeIdx = thisComp.layer('" + ctrl.name + "').effect('Smooth Index')('ADBE Slider Control-0001');\n" +
                    "var diff = Math.abs(idx - activeIdx);\n" +
                    "var s = linear(diff, 0, 0.8, " + (cfg.activeScale * 100) + ", 100);\n" +
                    "[s, s];";
                tLayer.property("ADBE Transform Group").property("ADBE Scale").expression = scaleExpr;

                // Opacity
                var opExpr =
                    "var idx = " + i + ";\n" +
                    "var activeIdx = thisComp.layer('" + ctrl.name + "').effect('Smooth Index')('ADBE Slider Control-0001');\n" +
                    "var diff = Math.abs(idx - activeIdx);\n" +
                    "linear(diff, 1.0, 3.5, 100, " + cfg.inactiveOpacity + ");";
                tLayer.property("ADBE Transform Group").property("ADBE Opacity").expression = opExpr;

                // Blur
                var blurEff = tLayer.property("ADBE Effect Parade").addProperty("ADBE Gaussian Blur 2");
                blurEff.name = "Blur";
                var blurProp = blurEff.property("ADBE Gaussian Blur 2-0001");

                var blurExpr =
                    "var idx = " + i + ";\n" +
                    "var activeIdx = thisComp.layer('" + ctrl.name + "').effect('Smooth Index')('ADBE Slider Control-0001');\n" +
                    "var diff = Math.abs(idx - activeIdx);\n" +
                    "(diff < 0.3) ? 0 : " + cfg.blurMax + ";";
                blurProp.expression = blurExpr;

                if (pb) pb.value = (i / lines.length) * 100;
            }
        }
"##;

const SCRIPT_FOOTER: &str = r##"
        var win = buildUI(thisObj);
        if (win instanceof Window) {
            win.center();
            win.show();
        } else {
            win.layout.layout(true);
        }
    }
    LyricalAEScript(this);
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Alignment, HexColor};

    // 生成是确定性的：两次调用逐字节相同
    #[test]
    fn test_generation_is_deterministic() {
        let config = ScriptConfig::default();
        assert_eq!(generate_ae_script(&config), generate_ae_script(&config));
    }

    // 配置字段都落在固定的模板槽位里
    #[test]
    fn test_config_values_are_interpolated() {
        let config = ScriptConfig::default();
        let script = generate_ae_script(&config);

        assert!(script.contains("compName: \"Lyric_Comp\","));
        assert!(script.contains("width: 1920,"));
        assert!(script.contains("fps: 30,"));
        assert!(script.contains("duration: 300,"));
        assert!(script.contains("textColor: [1.00, 1.00, 1.00],"));
        assert!(script.contains("inactiveOpacity: 60,"));
        assert!(script.contains("activeScale: 1.1,"));
        assert!(script.contains("alignment: \"left\","));
    }

    // 内嵌解析器的正则与本库的解析器共享同一份模式
    #[test]
    fn test_embedded_regex_matches_rust_parser() {
        let script = generate_ae_script(&ScriptConfig::default());
        let expected = format!("var regex = /{LRC_TIMESTAMP_PATTERN}(.*)/;");
        assert!(script.contains(&expected));
    }

    // ADBE Match Name 是宿主契约，必须逐字出现
    #[test]
    fn test_adbe_match_names_present() {
        let script = generate_ae_script(&ScriptConfig::default());
        for name in [
            "ADBE Effect Parade",
            "ADBE Slider Control",
            "ADBE Slider Control-0001",
            "ADBE Text Properties",
            "ADBE Text Document",
            "ADBE Text Animators",
            "ADBE Text Animator",
            "ADBE Text Fill Color",
            "ADBE Text Position",
            "ADBE Text Selectors",
            "ADBE Text Selector",
            "ADBE Text Percent End",
            "ADBE Transform Group",
            "ADBE Position",
            "ADBE Anchor Point",
            "ADBE Scale",
            "ADBE Opacity",
            "ADBE Gaussian Blur 2",
            "ADBE Gaussian Blur 2-0001",
        ] {
            assert!(script.contains(name), "缺少 Match Name: {name}");
        }
    }

    // 含引号的字体名必须被转义，否则会破坏脚本
    #[test]
    fn test_user_strings_are_escaped() {
        let config = ScriptConfig {
            font_family: "My \"Fancy\" Font".to_string(),
            comp_name: "A\\B".to_string(),
            ..ScriptConfig::default()
        };
        let script = generate_ae_script(&config);

        assert!(script.contains(r#"font: "My \"Fancy\" Font","#));
        assert!(script.contains(r#"compName: "A\\B","#));
        assert!(!script.contains("font: \"My \"Fancy\" Font\""));
    }

    // 居中对齐与自定义颜色
    #[test]
    fn test_center_alignment_and_colors() {
        let config = ScriptConfig {
            alignment: Alignment::Center,
            text_color: HexColor::new("#FF8000").unwrap(),
            ..ScriptConfig::default()
        };
        let script = generate_ae_script(&config);

        assert!(script.contains("alignment: \"center\","));
        assert!(script.contains("textColor: [1.00, 0.50, 0.00],"));
    }

    // 文件内容以 UTF-8 BOM 开头，其后与脚本本体一致
    #[test]
    fn test_file_contents_has_bom() {
        let config = ScriptConfig::default();
        let contents = script_file_contents(&config);
        assert!(contents.starts_with('\u{FEFF}'));
        assert_eq!(&contents[3..], generate_ae_script(&config));
    }

    // 越界数值不做校验，原样写入
    #[test]
    fn test_out_of_range_values_pass_through() {
        let config = ScriptConfig {
            text_lift: -42.5,
            ..ScriptConfig::default()
        };
        let script = generate_ae_script(&config);
        assert!(script.contains("textLift: -42.5"));
    }
}
